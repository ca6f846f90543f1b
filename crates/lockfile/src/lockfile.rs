use crate::{
    convert_v6_dependency_path, convert_v6_reference, ComVer, PackageSnapshot, ProjectSnapshot,
    ResolvedDependencyMap,
};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Id of the importer at the root of the lockfile directory.
pub const ROOT_IMPORTER_ID: &str = ".";

/// In-memory form of `pnpm-lock.yaml`.
///
/// Regardless of the revision on disk, importers always carry a separate `specifiers` map and
/// package keys always use the `/{name}/{version}` form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "LockfileFile")]
pub struct Lockfile {
    pub lockfile_version: ComVer,
    /// Projects keyed by their path relative to the lockfile directory (`.` for the root).
    pub importers: BTreeMap<String, ProjectSnapshot>,
    /// Resolved packages keyed by dependency path.
    pub packages: BTreeMap<String, PackageSnapshot>,
}

impl Lockfile {
    /// Base file name of the lockfile.
    pub const FILE_NAME: &str = "pnpm-lock.yaml";
}

/// Value of an importer's dependency map on disk.
///
/// Revision 5 stores the resolved reference only, revision 6 inlines the specifier.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImporterDependency {
    Inline { specifier: String, version: String },
    Reference(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectSnapshotFile {
    #[serde(default)]
    specifiers: BTreeMap<String, String>,
    dependencies: Option<BTreeMap<String, ImporterDependency>>,
    dev_dependencies: Option<BTreeMap<String, ImporterDependency>>,
    optional_dependencies: Option<BTreeMap<String, ImporterDependency>>,
}

/// Layout of the file on disk.
///
/// A single-project lockfile has no `importers`; its root project fields sit at the top level.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LockfileFile {
    lockfile_version: ComVer,
    importers: Option<BTreeMap<String, ProjectSnapshotFile>>,
    #[serde(flatten)]
    root_project: ProjectSnapshotFile,
    packages: Option<BTreeMap<String, PackageSnapshot>>,
}

/// Converts references and dependency paths of the revision on disk into the in-memory form.
#[derive(Debug, Clone, Copy)]
struct Revision {
    inline_specifiers: bool,
}

impl Revision {
    fn of(version: ComVer) -> Self {
        Revision { inline_specifiers: version.major >= 6 }
    }

    fn dependency_path(self, path: String) -> String {
        if self.inline_specifiers {
            convert_v6_dependency_path(&path).into_owned()
        } else {
            path
        }
    }

    fn reference(self, reference: String) -> String {
        if self.inline_specifiers {
            convert_v6_reference(&reference).into_owned()
        } else {
            reference
        }
    }

    fn references(self, map: Option<ResolvedDependencyMap>) -> Option<ResolvedDependencyMap> {
        map.map(|map| {
            map.into_iter().map(|(name, reference)| (name, self.reference(reference))).collect()
        })
    }

    fn project_snapshot(self, file: ProjectSnapshotFile) -> ProjectSnapshot {
        let ProjectSnapshotFile {
            mut specifiers,
            dependencies,
            dev_dependencies,
            optional_dependencies,
        } = file;

        let mut split = |map: Option<BTreeMap<String, ImporterDependency>>| {
            map.map(|map| {
                map.into_iter()
                    .map(|(name, dependency)| {
                        let reference = match dependency {
                            ImporterDependency::Inline { specifier, version } => {
                                specifiers.insert(name.clone(), specifier);
                                version
                            }
                            ImporterDependency::Reference(reference) => reference,
                        };
                        (name, self.reference(reference))
                    })
                    .collect::<ResolvedDependencyMap>()
            })
        };

        let dependencies = split(dependencies);
        let dev_dependencies = split(dev_dependencies);
        let optional_dependencies = split(optional_dependencies);

        ProjectSnapshot { specifiers, dependencies, dev_dependencies, optional_dependencies }
    }

    fn package_snapshot(self, snapshot: PackageSnapshot) -> PackageSnapshot {
        PackageSnapshot {
            dependencies: self.references(snapshot.dependencies),
            optional_dependencies: self.references(snapshot.optional_dependencies),
            ..snapshot
        }
    }
}

impl From<LockfileFile> for Lockfile {
    fn from(file: LockfileFile) -> Self {
        let LockfileFile { lockfile_version, importers, root_project, packages } = file;
        let revision = Revision::of(lockfile_version);

        let importers = match importers {
            Some(importers) => importers
                .into_iter()
                .map(|(id, snapshot)| (id, revision.project_snapshot(snapshot)))
                .collect(),
            None => BTreeMap::from([(
                ROOT_IMPORTER_ID.to_string(),
                revision.project_snapshot(root_project),
            )]),
        };

        let packages = packages
            .unwrap_or_default()
            .into_iter()
            .map(|(path, snapshot)| {
                (revision.dependency_path(path), revision.package_snapshot(snapshot))
            })
            .collect();

        Lockfile { lockfile_version, importers, packages }
    }
}
