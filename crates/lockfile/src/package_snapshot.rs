use crate::{LockfileResolution, ResolvedDependencyMap};
use serde::Deserialize;

/// Record of one resolved package, the value of the `packages` map.
///
/// Fields the conversion has no use for (`engines`, `cpu`, `hasBin`, ...) are ignored.
// Reference: https://github.com/pnpm/pnpm/blob/main/lockfile/lockfile-file/src/sortLockfileKeys.ts#L5
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSnapshot {
    pub resolution: LockfileResolution,

    pub name: Option<String>,
    pub version: Option<String>,

    pub dependencies: Option<ResolvedDependencyMap>,
    pub optional_dependencies: Option<ResolvedDependencyMap>,

    pub dev: Option<bool>,
    pub optional: Option<bool>,
}

impl PackageSnapshot {
    /// Iterate over `dependencies` followed by `optionalDependencies`.
    pub fn all_dependencies(&self) -> impl Iterator<Item = (&'_ str, &'_ str)> {
        [self.dependencies.as_ref(), self.optional_dependencies.as_ref()]
            .into_iter()
            .flatten()
            .flat_map(|map| map.iter())
            .map(|(name, reference)| (name.as_str(), reference.as_str()))
    }
}
