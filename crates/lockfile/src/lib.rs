mod comver;
mod dedicated_lockfile;
mod dependency_path;
mod dependency_reference;
mod describe;
mod load_lockfile;
mod lockfile;
mod package_snapshot;
mod peers_suffix;
mod project_snapshot;
mod prune;
mod resolution;

pub use comver::{ComVer, ParseComVerError};
pub use dedicated_lockfile::{importer_id, SliceError};
pub use dependency_path::{convert_v6_dependency_path, convert_v6_reference, DependencyPath};
pub use dependency_reference::{dependency_path_of, DependencyReference};
pub use describe::{describe, registry_tarball_url, DescribeError, PackageDescription};
pub use load_lockfile::LoadLockfileError;
pub use lockfile::{Lockfile, ROOT_IMPORTER_ID};
pub use package_snapshot::PackageSnapshot;
pub use peers_suffix::{index_of_peers_suffix, without_peers_suffix};
pub use project_snapshot::{DependencyGroup, ProjectSnapshot, ResolvedDependencyMap};
pub use prune::prune_packages;
pub use resolution::{
    DirectoryResolution, GitResolution, LockfileResolution, RegistryResolution, TarballResolution,
};
