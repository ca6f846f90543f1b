use pipe_trait::Pipe;
use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

/// Registry used when neither `.npmrc` nor the package scope says otherwise.
pub const DEFAULT_REGISTRY: &str = "https://registry.npmjs.org/";

/// Registry base URLs used to derive tarball locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registries {
    /// The base URL of the npm package registry (trailing slash included).
    pub default: String,
    /// Registries of `@scope:registry` entries, keyed by scope including the `@`.
    pub scoped: BTreeMap<String, String>,
}

impl Default for Registries {
    fn default() -> Self {
        Registries { default: DEFAULT_REGISTRY.to_string(), scoped: BTreeMap::new() }
    }
}

impl Registries {
    /// Pick the registry for a package name.
    ///
    /// Scoped packages (`@scope/name`) use the registry of their scope when one is configured.
    pub fn for_package(&self, name: &str) -> &'_ str {
        name.strip_prefix('@')
            .and_then(|rest| rest.split_once('/'))
            .and_then(|(scope, _)| self.scoped.get(&format!("@{scope}")))
            .unwrap_or(&self.default)
    }
}

/// Settings read from `.npmrc`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Npmrc {
    pub registries: Registries,
}

impl Npmrc {
    pub const FILE_NAME: &str = ".npmrc";

    /// Parse the content of an `.npmrc` file.
    ///
    /// Unknown keys are ignored.
    pub fn parse(content: &str) -> Result<Self, serde_ini::de::Error> {
        let entries: HashMap<String, String> = serde_ini::from_str(content)?;
        let mut registries = Registries::default();
        for (key, value) in entries {
            if key == "registry" {
                registries.default = with_trailing_slash(value);
            } else if let Some(scope) = key.strip_suffix(":registry") {
                if scope.starts_with('@') {
                    registries.scoped.insert(scope.to_string(), with_trailing_slash(value));
                }
            }
        }
        Ok(Npmrc { registries })
    }

    /// Load `.npmrc` of `project_dir`, falling back to the one in the home directory.
    ///
    /// Missing or malformed files produce the default settings.
    pub fn current(project_dir: &Path) -> Self {
        Npmrc::current_with(project_dir, home::home_dir)
    }

    fn current_with(project_dir: &Path, home_dir: impl FnOnce() -> Option<PathBuf>) -> Self {
        let local = project_dir.join(Npmrc::FILE_NAME);
        let path = if local.is_file() {
            Some(local)
        } else {
            home_dir().map(|dir| dir.join(Npmrc::FILE_NAME))
        };

        let Some(path) = path else {
            return Npmrc::default();
        };

        let Ok(content) = fs::read_to_string(&path) else {
            return Npmrc::default();
        };

        content.pipe_as_ref(Npmrc::parse).unwrap_or_else(|error| {
            tracing::warn!(target: "lock_export::npmrc", ?path, %error, "Ignore malformed .npmrc");
            Npmrc::default()
        })
    }
}

fn with_trailing_slash(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;
    use text_block_macros::text_block_fnl;

    #[test]
    fn default_registry() {
        let config = Npmrc::parse("").unwrap();
        assert_eq!(config.registries.default, DEFAULT_REGISTRY);
        assert!(config.registries.scoped.is_empty());
    }

    #[test]
    fn parse_registries() {
        let content = text_block_fnl! {
            "registry=https://registry.example.com"
            "@acme:registry=https://npm.acme.dev/"
            "//registry.example.com/:_authToken=secret"
            "store-dir=../store"
        };
        let Npmrc { registries } = Npmrc::parse(content).unwrap();
        assert_eq!(registries.default, "https://registry.example.com/");
        assert_eq!(
            registries.scoped,
            BTreeMap::from([("@acme".to_string(), "https://npm.acme.dev/".to_string())]),
        );
    }

    #[test]
    fn registry_for_package() {
        let registries = Registries {
            default: DEFAULT_REGISTRY.to_string(),
            scoped: BTreeMap::from([("@acme".to_string(), "https://npm.acme.dev/".to_string())]),
        };
        assert_eq!(registries.for_package("lodash"), DEFAULT_REGISTRY);
        assert_eq!(registries.for_package("@acme/widgets"), "https://npm.acme.dev/");
        assert_eq!(registries.for_package("@types/node"), DEFAULT_REGISTRY);
    }

    #[test]
    fn prefer_project_npmrc() {
        let project = tempdir().unwrap();
        let home = tempdir().unwrap();
        fs::write(project.path().join(".npmrc"), "registry=https://project.test/\n").unwrap();
        fs::write(home.path().join(".npmrc"), "registry=https://home.test/\n").unwrap();
        let config = Npmrc::current_with(project.path(), || home.path().to_path_buf().into());
        assert_eq!(config.registries.default, "https://project.test/");
    }

    #[test]
    fn fall_back_to_home_npmrc() {
        let project = tempdir().unwrap();
        let home = tempdir().unwrap();
        fs::write(home.path().join(".npmrc"), "registry=https://home.test\n").unwrap();
        let config = Npmrc::current_with(project.path(), || home.path().to_path_buf().into());
        assert_eq!(config.registries.default, "https://home.test/");
    }

    #[test]
    fn no_npmrc_anywhere() {
        let project = tempdir().unwrap();
        let config = Npmrc::current_with(project.path(), || None);
        assert_eq!(config, Npmrc::default());
    }
}
