mod save;
mod serialize;

pub use save::SaveYarnLockError;
pub use serialize::PREAMBLE;

use std::collections::BTreeMap;

/// One package of a yarn v1 lockfile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatPackageRecord {
    pub version: String,
    pub resolved: String,
    /// Omitted from the output when absent.
    pub integrity: Option<String>,
    /// Dependency names mapped to bare versions.
    pub dependencies: Option<BTreeMap<String, String>>,
}

/// A record together with the `name@specifier` strings that resolve to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YarnLockEntry {
    /// Unquoted `name@specifier` keys, in output order, without duplicates.
    pub specifiers: Vec<String>,
    pub record: FlatPackageRecord,
}

/// In-memory form of a yarn v1 `yarn.lock`.
///
/// Entries are written in the order they are stored.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct YarnLock {
    pub entries: Vec<YarnLockEntry>,
}

impl YarnLock {
    /// Base file name of the lockfile.
    pub const FILE_NAME: &str = "yarn.lock";
}

impl FromIterator<YarnLockEntry> for YarnLock {
    fn from_iter<Iter: IntoIterator<Item = YarnLockEntry>>(iter: Iter) -> Self {
        YarnLock { entries: iter.into_iter().collect() }
    }
}
