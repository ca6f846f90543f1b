use serde::Deserialize;

/// Content of `pnpm-workspace.yaml`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct PnpmWorkspace {
    #[serde(default)]
    pub packages: Vec<String>,
}

impl PnpmWorkspace {
    pub const FILE_NAME: &str = "pnpm-workspace.yaml";
}

/// The part of `package.json` that declares workspace projects.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageJson {
    pub workspaces: Option<WorkspacesField>,
}

impl PackageJson {
    pub const FILE_NAME: &str = "package.json";
}

/// `workspaces` is either a list of globs or, for yarn, an object with a `packages` list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WorkspacesField {
    Globs(Vec<String>),
    Detailed {
        #[serde(default)]
        packages: Vec<String>,
    },
}

impl WorkspacesField {
    pub fn globs(&self) -> &'_ [String] {
        match self {
            WorkspacesField::Globs(globs) | WorkspacesField::Detailed { packages: globs } => globs,
        }
    }
}
