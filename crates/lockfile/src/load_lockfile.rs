use crate::Lockfile;
use derive_more::{Display, Error};
use lock_export_diagnostics::miette::{self, Diagnostic};
use pipe_trait::Pipe;
use std::{
    fs,
    io::{self, ErrorKind},
    path::Path,
};

/// Error when reading lockfile the filesystem.
#[derive(Debug, Display, Error, Diagnostic)]
#[non_exhaustive]
pub enum LoadLockfileError {
    #[display("Failed to read lockfile content: {_0}")]
    #[diagnostic(code(lock_export_lockfile::read_file))]
    ReadFile(io::Error),

    #[display("Failed to parse lockfile content as YAML: {_0}")]
    #[diagnostic(code(lock_export_lockfile::parse_yaml))]
    ParseYaml(serde_yaml::Error),
}

impl Lockfile {
    /// Load the lockfile of a directory.
    ///
    /// Returns `Ok(None)` when the directory has no lockfile.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>, LoadLockfileError> {
        let file_path = dir.join(Lockfile::FILE_NAME);
        let content = match fs::read_to_string(&file_path) {
            Ok(content) => content,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return error.pipe(LoadLockfileError::ReadFile).pipe(Err),
        };
        tracing::debug!(target: "lock_export::lockfile", ?file_path, "Loaded lockfile");
        content.pipe_as_ref(Lockfile::parse).map(Some)
    }

    /// Parse the content of a lockfile.
    pub fn parse(content: &str) -> Result<Self, LoadLockfileError> {
        serde_yaml::from_str(content).map_err(LoadLockfileError::ParseYaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ComVer;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn missing_lockfile() {
        let dir = tempdir().unwrap();
        assert!(Lockfile::load_from_dir(dir.path()).unwrap().is_none());
    }

    #[test]
    fn existing_lockfile() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(Lockfile::FILE_NAME), "lockfileVersion: '6.0'\n").unwrap();
        let lockfile = Lockfile::load_from_dir(dir.path()).unwrap().unwrap();
        assert_eq!(lockfile.lockfile_version, ComVer::new(6, 0));
    }

    #[test]
    fn malformed_lockfile() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(Lockfile::FILE_NAME), "importers: [\n").unwrap();
        let error = Lockfile::load_from_dir(dir.path()).unwrap_err();
        dbg!(&error);
        assert!(matches!(error, LoadLockfileError::ParseYaml(_)));
    }
}
