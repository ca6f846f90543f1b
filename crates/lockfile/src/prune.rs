use crate::{dependency_path_of, PackageSnapshot, ProjectSnapshot};
use std::collections::{BTreeMap, HashSet};

/// Keep only the packages reachable from the dependencies of `importers`.
///
/// Both `dependencies` and `optionalDependencies` of packages are followed. References that
/// point outside of `packages` (such as `link:` references) are skipped.
pub fn prune_packages(
    importers: &BTreeMap<String, ProjectSnapshot>,
    packages: &BTreeMap<String, PackageSnapshot>,
) -> BTreeMap<String, PackageSnapshot> {
    let mut pending: Vec<String> = importers
        .values()
        .flat_map(ProjectSnapshot::all_dependencies)
        .map(|(name, reference)| dependency_path_of(name, reference))
        .collect();
    let mut reachable = HashSet::new();

    while let Some(dependency_path) = pending.pop() {
        let Some(snapshot) = packages.get(&dependency_path) else {
            continue;
        };
        if !reachable.insert(dependency_path) {
            continue;
        }
        pending.extend(
            snapshot
                .all_dependencies()
                .map(|(name, reference)| dependency_path_of(name, reference))
                .filter(|path| !reachable.contains(path)),
        );
    }

    packages
        .iter()
        .filter(|(dependency_path, _)| reachable.contains(*dependency_path))
        .map(|(dependency_path, snapshot)| (dependency_path.clone(), snapshot.clone()))
        .collect()
}
