use crate::{PackageJson, PnpmWorkspace};
use derive_more::{Display, Error};
use glob::{MatchOptions, Pattern};
use lock_export_diagnostics::miette::{self, Diagnostic};
use pipe_trait::Pipe;
use std::{
    collections::BTreeSet,
    fs, io,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Error type of [`list_project_dirs`].
#[derive(Debug, Display, Error, Diagnostic)]
#[non_exhaustive]
pub enum ListProjectDirsError {
    #[display("Failed to read {file_path:?}: {error}")]
    #[diagnostic(code(lock_export_workspace::read_file))]
    ReadFile {
        file_path: PathBuf,
        #[error(source)]
        error: io::Error,
    },

    #[display("Failed to parse {file_path:?}: {error}")]
    #[diagnostic(code(lock_export_workspace::parse_workspace_yaml))]
    ParseWorkspaceYaml {
        file_path: PathBuf,
        #[error(source)]
        error: serde_yaml::Error,
    },

    #[display("Failed to parse {file_path:?}: {error}")]
    #[diagnostic(code(lock_export_workspace::parse_package_json))]
    ParsePackageJson {
        file_path: PathBuf,
        #[error(source)]
        error: serde_json::Error,
    },

    #[display("Invalid glob {glob:?}: {error}")]
    #[diagnostic(code(lock_export_workspace::invalid_glob))]
    InvalidGlob {
        glob: String,
        #[error(source)]
        error: glob::PatternError,
    },
}

/// Directories that are never searched for projects.
const IGNORED_DIR_NAMES: &[&str] = &["node_modules", ".git"];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// List the directories of the projects of the workspace at `root_dir`, excluding `root_dir`.
///
/// Globs are read from `pnpm-workspace.yaml`, falling back to the `workspaces` field of
/// `package.json`. A glob prefixed with `!` excludes the directories it matches. Only directories
/// containing a `package.json` are projects. The result is sorted.
pub fn list_project_dirs(root_dir: &Path) -> Result<Vec<PathBuf>, ListProjectDirsError> {
    let globs = read_globs(root_dir)?;
    if globs.is_empty() {
        return Ok(Vec::new());
    }

    let mut included = Vec::new();
    let mut excluded = Vec::new();
    for glob in &globs {
        let (list, source) = match glob.strip_prefix('!') {
            Some(source) => (&mut excluded, source),
            None => (&mut included, glob.as_str()),
        };
        let source = source.trim_start_matches("./").trim_end_matches('/');
        let pattern = Pattern::new(source)
            .map_err(|error| ListProjectDirsError::InvalidGlob { glob: glob.clone(), error })?;
        list.push(pattern);
    }

    let project_dirs: BTreeSet<PathBuf> = WalkDir::new(root_dir)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            !IGNORED_DIR_NAMES.contains(&&*name)
        })
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_dir())
        .filter(|entry| entry.path() != root_dir)
        .filter(|entry| {
            let Ok(relative) = entry.path().strip_prefix(root_dir) else {
                return false;
            };
            let matches = |pattern: &Pattern| pattern.matches_path_with(relative, MATCH_OPTIONS);
            included.iter().any(matches) && !excluded.iter().any(matches)
        })
        .filter(|entry| entry.path().join(PackageJson::FILE_NAME).is_file())
        .map(|entry| entry.into_path())
        .collect();

    tracing::debug!(target: "lock_export::workspace", ?root_dir, count = project_dirs.len(), "Listed workspace projects");

    Ok(project_dirs.into_iter().collect())
}

fn read_globs(root_dir: &Path) -> Result<Vec<String>, ListProjectDirsError> {
    let workspace_path = root_dir.join(PnpmWorkspace::FILE_NAME);
    if let Some(content) = read_optional(&workspace_path)? {
        return serde_yaml::from_str::<Option<PnpmWorkspace>>(&content)
            .map_err(|error| ListProjectDirsError::ParseWorkspaceYaml {
                file_path: workspace_path,
                error,
            })?
            .unwrap_or_default()
            .packages
            .pipe(Ok);
    }

    let manifest_path = root_dir.join(PackageJson::FILE_NAME);
    let Some(content) = read_optional(&manifest_path)? else {
        return Ok(Vec::new());
    };
    let manifest: PackageJson = serde_json::from_str(&content).map_err(|error| {
        ListProjectDirsError::ParsePackageJson { file_path: manifest_path, error }
    })?;
    Ok(manifest.workspaces.map(|field| field.globs().to_vec()).unwrap_or_default())
}

fn read_optional(file_path: &Path) -> Result<Option<String>, ListProjectDirsError> {
    match fs::read_to_string(file_path) {
        Ok(content) => Ok(Some(content)),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(error) => {
            Err(ListProjectDirsError::ReadFile { file_path: file_path.to_path_buf(), error })
        }
    }
}
