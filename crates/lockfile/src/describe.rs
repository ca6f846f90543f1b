use crate::{DependencyPath, LockfileResolution, PackageSnapshot};
use derive_more::{Display, Error};
use lock_export_diagnostics::miette::{self, Diagnostic};
use lock_export_npmrc::Registries;

/// Name, version and location of a resolved package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescription {
    pub name: String,
    pub version: String,
    /// Where the package can be fetched from.
    pub resolved: String,
    pub integrity: Option<String>,
}

/// Error when a package cannot be described.
#[derive(Debug, Display, Error, Diagnostic)]
#[non_exhaustive]
pub enum DescribeError {
    #[display("Cannot determine the name and version of {dependency_path:?}")]
    #[diagnostic(code(lock_export_lockfile::unknown_name_version))]
    UnknownNameVersion {
        #[error(not(source))]
        dependency_path: String,
    },
}

/// Describe the package stored under `dependency_path`.
///
/// Name and version are taken from the snapshot when it carries them, and from the dependency
/// path otherwise.
pub fn describe(
    dependency_path: &str,
    snapshot: &PackageSnapshot,
    registries: &Registries,
) -> Result<PackageDescription, DescribeError> {
    let parsed = DependencyPath::parse(dependency_path);
    let name = snapshot.name.as_deref().or(parsed.map(|path| path.name));
    let version = snapshot.version.as_deref().or(parsed.map(|path| path.version));
    let (Some(name), Some(version)) = (name, version) else {
        return Err(DescribeError::UnknownNameVersion {
            dependency_path: dependency_path.to_string(),
        });
    };

    let registry = registries.for_package(name);
    let resolved = match &snapshot.resolution {
        LockfileResolution::Tarball(resolution) => resolve_tarball(&resolution.tarball, registry),
        LockfileResolution::Registry(_) => registry_tarball_url(registry, name, version),
        LockfileResolution::Directory(resolution) => format!("file:{}", resolution.directory),
        LockfileResolution::Git(resolution) => {
            format!("git+{}#{}", resolution.repo, resolution.commit)
        }
    };

    Ok(PackageDescription {
        name: name.to_string(),
        version: version.to_string(),
        resolved,
        integrity: snapshot.resolution.integrity().map(ToString::to_string),
    })
}

/// URL of a package tarball in an npm registry.
///
/// Build metadata is not part of the file name.
pub fn registry_tarball_url(registry: &str, name: &str, version: &str) -> String {
    let scopeless = name.rsplit('/').next().unwrap_or(name);
    let version = version.split_once('+').map_or(version, |(version, _)| version);
    format!("{registry}{name}/-/{scopeless}-{version}.tgz")
}

fn resolve_tarball(tarball: &str, registry: &str) -> String {
    if tarball.starts_with("file:") || tarball.contains("://") {
        return tarball.to_string();
    }
    if let Some(path) = tarball.strip_prefix('/') {
        return format!("{}/{path}", registry_origin(registry));
    }
    format!("{registry}{tarball}")
}

/// Scheme and host of a registry URL, without a trailing slash.
fn registry_origin(registry: &str) -> &'_ str {
    let Some(scheme_end) = registry.find("://").map(|index| index + 3) else {
        return registry.trim_end_matches('/');
    };
    match registry[scheme_end..].find('/') {
        Some(index) => &registry[..scheme_end + index],
        None => registry,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DirectoryResolution, GitResolution, RegistryResolution, TarballResolution};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    const INTEGRITY: &str = "sha512-v2kDEe57lecTulaDIuNTPy3Ry4gLGJ6Z1O3vE1krgXZNrsQ+LFTGHVxVjcXPs17LhbZVGedAJv8XZ1tvj5FvSg==";

    fn snapshot(resolution: impl Into<LockfileResolution>) -> PackageSnapshot {
        PackageSnapshot {
            resolution: resolution.into(),
            name: None,
            version: None,
            dependencies: None,
            optional_dependencies: None,
            dev: None,
            optional: None,
        }
    }

    fn registry_resolution() -> RegistryResolution {
        RegistryResolution { integrity: INTEGRITY.to_string() }
    }

    #[test]
    fn registry_package() {
        let received = describe(
            "/react-dom/18.0.0(react@18.0.0)",
            &snapshot(registry_resolution()),
            &Registries::default(),
        )
        .unwrap();
        let expected = PackageDescription {
            name: "react-dom".to_string(),
            version: "18.0.0".to_string(),
            resolved: "https://registry.npmjs.org/react-dom/-/react-dom-18.0.0.tgz".to_string(),
            integrity: Some(INTEGRITY.to_string()),
        };
        assert_eq!(received, expected);
    }

    #[test]
    fn scoped_package_uses_scoped_registry() {
        let registries = Registries {
            default: "https://registry.npmjs.org/".to_string(),
            scoped: BTreeMap::from([(
                "@company".to_string(),
                "https://npm.company.test/".to_string(),
            )]),
        };
        let received =
            describe("/@company/utils/1.2.3", &snapshot(registry_resolution()), &registries)
                .unwrap();
        assert_eq!(received.name, "@company/utils");
        assert_eq!(received.resolved, "https://npm.company.test/@company/utils/-/utils-1.2.3.tgz");
    }

    #[test]
    fn build_metadata_is_not_in_tarball_name() {
        assert_eq!(
            registry_tarball_url("https://registry.npmjs.org/", "esbuild", "0.1.0+build.5"),
            "https://registry.npmjs.org/esbuild/-/esbuild-0.1.0.tgz",
        );
    }

    #[test]
    fn tarball_locations() {
        macro_rules! case {
            ($tarball:expr, $registry:expr => $output:expr) => {{
                let (tarball, registry) = ($tarball, $registry);
                eprintln!("CASE: {tarball:?}, {registry:?}");
                assert_eq!(resolve_tarball(tarball, registry), $output);
            }};
        }

        case!("file:vendor/foo-1.0.0.tgz", "https://registry.npmjs.org/" => "file:vendor/foo-1.0.0.tgz");
        case!("https://example.test/foo.tgz", "https://registry.npmjs.org/" => "https://example.test/foo.tgz");
        case!("foo/-/foo-1.0.0.tgz", "https://npm.company.test/npm/" => "https://npm.company.test/npm/foo/-/foo-1.0.0.tgz");
        case!("/foo/-/foo-1.0.0.tgz", "https://npm.company.test/npm/" => "https://npm.company.test/foo/-/foo-1.0.0.tgz");
    }

    #[test]
    fn git_package_takes_name_from_snapshot() {
        let mut snapshot = snapshot(GitResolution {
            repo: "https://github.com/user/repo.git".to_string(),
            commit: "e63c09e460269b0c535e4c34debf69bb91d57b22".to_string(),
        });
        snapshot.name = Some("repo".to_string());
        snapshot.version = Some("0.2.1".to_string());
        let received = describe(
            "github.com/user/repo/e63c09e460269b0c535e4c34debf69bb91d57b22",
            &snapshot,
            &Registries::default(),
        )
        .unwrap();
        let expected = PackageDescription {
            name: "repo".to_string(),
            version: "0.2.1".to_string(),
            resolved: "git+https://github.com/user/repo.git#e63c09e460269b0c535e4c34debf69bb91d57b22"
                .to_string(),
            integrity: None,
        };
        assert_eq!(received, expected);
    }

    #[test]
    fn directory_package() {
        let mut snapshot =
            snapshot(DirectoryResolution { directory: "../local/pkg".to_string() });
        snapshot.name = Some("pkg".to_string());
        snapshot.version = Some("1.0.0".to_string());
        let received = describe("file:../local/pkg", &snapshot, &Registries::default()).unwrap();
        assert_eq!(received.resolved, "file:../local/pkg");
        assert_eq!(received.integrity, None);
    }

    #[test]
    fn tarball_without_integrity() {
        let received = describe(
            "/foo/1.0.0",
            &snapshot(TarballResolution {
                tarball: "https://example.test/foo.tgz".to_string(),
                integrity: None,
            }),
            &Registries::default(),
        )
        .unwrap();
        assert_eq!(received.resolved, "https://example.test/foo.tgz");
        assert_eq!(received.integrity, None);
    }

    #[test]
    fn unknown_name_version() {
        let error = describe(
            "github.com/user/repo/abcdef0",
            &snapshot(GitResolution {
                repo: "https://github.com/user/repo.git".to_string(),
                commit: "abcdef0".to_string(),
            }),
            &Registries::default(),
        )
        .unwrap_err();
        dbg!(&error);
        assert!(matches!(error, DescribeError::UnknownNameVersion { .. }));
    }
}
