use crate::YarnLock;
use derive_more::{Display, Error};
use lock_export_diagnostics::miette::{self, Diagnostic};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Error when writing `yarn.lock` to the filesystem.
#[derive(Debug, Display, Error, Diagnostic)]
#[non_exhaustive]
pub enum SaveYarnLockError {
    #[display("Failed to write {file_path:?}: {error}")]
    #[diagnostic(code(lock_export_yarn_lockfile::write_file))]
    WriteFile {
        file_path: PathBuf,
        #[error(source)]
        error: io::Error,
    },
}

impl YarnLock {
    /// Write `yarn.lock` into `dir`, replacing any existing one.
    pub fn save_to_dir(&self, dir: &Path) -> Result<(), SaveYarnLockError> {
        let file_path = dir.join(YarnLock::FILE_NAME);
        if let Err(error) = fs::write(&file_path, self.serialize()) {
            return Err(SaveYarnLockError::WriteFile { file_path, error });
        }
        tracing::info!(target: "lock_export::yarn_lockfile", ?file_path, "Wrote yarn.lock");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::PREAMBLE;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn save_and_read_back() {
        let dir = tempdir().unwrap();
        YarnLock::default().save_to_dir(dir.path()).unwrap();
        let content = fs::read_to_string(dir.path().join("yarn.lock")).unwrap();
        assert_eq!(content, format!("{PREAMBLE}\n\n"));
    }

    #[test]
    fn missing_directory() {
        let dir = tempdir().unwrap();
        let error = YarnLock::default().save_to_dir(&dir.path().join("missing")).unwrap_err();
        dbg!(&error);
        assert!(matches!(error, SaveYarnLockError::WriteFile { .. }));
    }
}
