mod list_project_dirs;
mod manifest;

pub use list_project_dirs::{list_project_dirs, ListProjectDirsError};
pub use manifest::{PackageJson, PnpmWorkspace, WorkspacesField};
