use assert_cmd::prelude::*;
use command_extra::CommandExtra;
use std::{fs, path::PathBuf, process::Command};
use tempfile::{tempdir, TempDir};

/// Temporary workspace and a `pnpm-lock-export` command that runs inside it.
#[derive(Debug)]
pub struct CommandTempCwd {
    pub lock_export: Command,
    pub root: TempDir,
    pub workspace: PathBuf,
}

impl CommandTempCwd {
    /// Create a temporary directory, a `workspace` sub directory, and a command whose current
    /// directory is the workspace.
    ///
    /// The temporary directory doubles as the home directory so that no user `.npmrc` is read.
    pub fn init() -> Self {
        let root = tempdir().expect("create temporary directory");
        let workspace = root.path().join("workspace");
        fs::create_dir(&workspace).expect("create temporary workspace");
        let lock_export = Command::cargo_bin("pnpm-lock-export")
            .expect("find the pnpm-lock-export binary")
            .with_current_dir(&workspace)
            .with_env("HOME", root.path())
            .with_env("USERPROFILE", root.path());
        CommandTempCwd { lock_export, root, workspace }
    }
}
