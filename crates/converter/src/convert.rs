use crate::{TranslateError, Translator};
use derive_more::{Display, Error, From};
use futures_util::future;
use lock_export_diagnostics::miette::{self, Diagnostic};
use lock_export_lockfile::{importer_id, LoadLockfileError, Lockfile, SliceError};
use lock_export_workspace::{list_project_dirs, ListProjectDirsError};
use lock_export_yarn_lockfile::{SaveYarnLockError, YarnLock};
use pipe_trait::Pipe;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::task::{self, JoinError};

/// Error type of the conversion subroutines.
#[derive(Debug, Display, Error, From, Diagnostic)]
#[non_exhaustive]
pub enum ConvertError {
    #[from(ignore)]
    #[display("No pnpm-lock.yaml found in {dir:?}")]
    #[diagnostic(
        code(lock_export_converter::lockfile_not_found),
        help("Run `pnpm install` to create the lockfile")
    )]
    NotFound {
        #[error(not(source))]
        dir: PathBuf,
    },

    #[from(ignore)]
    #[display("Project {project_dir:?} is not inside {lockfile_dir:?}")]
    #[diagnostic(code(lock_export_converter::outside_lockfile_dir))]
    OutsideLockfileDir { project_dir: PathBuf, lockfile_dir: PathBuf },

    #[diagnostic(transparent)]
    LoadLockfile(#[error(source)] LoadLockfileError),

    #[diagnostic(transparent)]
    ListProjectDirs(#[error(source)] ListProjectDirsError),

    #[diagnostic(transparent)]
    Slice(#[error(source)] SliceError),

    #[diagnostic(transparent)]
    Translate(#[error(source)] TranslateError),

    #[diagnostic(transparent)]
    WriteFile(#[error(source)] SaveYarnLockError),

    #[display("Conversion task failed: {_0}")]
    #[diagnostic(code(lock_export_converter::task_join))]
    TaskJoin(#[error(source)] JoinError),
}

/// Load the lockfile of `lockfile_dir`, failing when there is none.
pub fn load_lockfile(lockfile_dir: &Path) -> Result<Lockfile, ConvertError> {
    Lockfile::load_from_dir(lockfile_dir)?
        .ok_or_else(|| ConvertError::NotFound { dir: lockfile_dir.to_path_buf() })
}

/// Translate the lockfile of `lockfile_dir` as a whole.
pub fn convert(lockfile_dir: &Path, translator: &Translator) -> Result<YarnLock, ConvertError> {
    let lockfile = load_lockfile(lockfile_dir)?;
    translator.translate(&lockfile)?.pipe(Ok)
}

/// Translate the part of a shared lockfile that belongs to the project at `project_dir`.
pub fn convert_dedicated(
    lockfile: &Lockfile,
    lockfile_dir: &Path,
    project_dir: &Path,
    translator: &Translator,
) -> Result<YarnLock, ConvertError> {
    let importer_id = importer_id(lockfile_dir, project_dir).ok_or_else(|| {
        ConvertError::OutsideLockfileDir {
            project_dir: project_dir.to_path_buf(),
            lockfile_dir: lockfile_dir.to_path_buf(),
        }
    })?;
    let dedicated = lockfile.dedicated(&importer_id)?;
    translator.translate(&dedicated)?.pipe(Ok)
}

/// Convert `pnpm-lock.yaml` of `lockfile_dir` into `yarn.lock` next to it.
pub fn write(lockfile_dir: &Path, translator: &Translator) -> Result<(), ConvertError> {
    tracing::info!(target: "lock_export::convert", ?lockfile_dir, "Start converting");
    convert(lockfile_dir, translator)?.save_to_dir(lockfile_dir)?;
    tracing::info!(target: "lock_export::convert", ?lockfile_dir, "Complete converting");
    Ok(())
}

/// This subroutine writes a dedicated `yarn.lock` for every project of a workspace, then one
/// for the workspace root.
///
/// Projects are converted concurrently from the same shared lockfile. Unless
/// [`fail_fast`](Self::fail_fast) is set, every project is attempted and the first error is
/// returned once all of them finished.
#[must_use]
pub struct WriteRecursive<'a> {
    pub lockfile_dir: &'a Path,
    pub translator: &'a Translator,
    pub fail_fast: bool,
}

impl<'a> WriteRecursive<'a> {
    /// Execute the subroutine.
    pub async fn run(self) -> Result<(), ConvertError> {
        let WriteRecursive { lockfile_dir, translator, fail_fast } = self;

        tracing::info!(target: "lock_export::convert", ?lockfile_dir, "Start all");

        let lockfile = lockfile_dir.pipe(load_lockfile)?.pipe(Arc::new);
        let project_dirs = list_project_dirs(lockfile_dir)?;
        let shared_translator = Arc::new(translator.clone());

        let tasks = project_dirs.into_iter().map(|project_dir| {
            let lockfile = Arc::clone(&lockfile);
            let translator = Arc::clone(&shared_translator);
            let lockfile_dir = lockfile_dir.to_path_buf();
            async move {
                task::spawn_blocking(move || {
                    write_dedicated(&lockfile, &lockfile_dir, &project_dir, &translator)
                })
                .await?
            }
        });

        let mut first_error = None;
        if fail_fast {
            future::try_join_all(tasks).await?;
        } else {
            for error in future::join_all(tasks).await.into_iter().filter_map(Result::err) {
                tracing::error!(target: "lock_export::convert", %error, "Failed to convert project");
                first_error.get_or_insert(error);
            }
        }

        if let Err(error) = write_whole(&lockfile, lockfile_dir, translator) {
            tracing::error!(target: "lock_export::convert", %error, "Failed to convert workspace root");
            first_error.get_or_insert(error);
        }

        tracing::info!(target: "lock_export::convert", ?lockfile_dir, "Complete all");

        first_error.map_or(Ok(()), Err)
    }
}

fn write_whole(
    lockfile: &Lockfile,
    lockfile_dir: &Path,
    translator: &Translator,
) -> Result<(), ConvertError> {
    translator.translate(lockfile)?.save_to_dir(lockfile_dir)?;
    Ok(())
}

fn write_dedicated(
    lockfile: &Lockfile,
    lockfile_dir: &Path,
    project_dir: &Path,
    translator: &Translator,
) -> Result<(), ConvertError> {
    tracing::info!(target: "lock_export::convert", ?project_dir, "Start converting");
    convert_dedicated(lockfile, lockfile_dir, project_dir, translator)?.save_to_dir(project_dir)?;
    tracing::info!(target: "lock_export::convert", ?project_dir, "Complete converting");
    Ok(())
}
