use crate::{FlatPackageRecord, YarnLock, YarnLockEntry};
use std::fmt::{self, Display, Formatter};

/// Header every generated `yarn.lock` starts with.
pub const PREAMBLE: &str =
    "# THIS IS AN AUTOGENERATED FILE. DO NOT EDIT THIS FILE DIRECTLY.\n# yarn lockfile v1\n";

impl Display for YarnLock {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{PREAMBLE}\n\n")?;
        for (index, entry) in self.entries.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

impl Display for YarnLockEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (index, specifier) in self.specifiers.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "\"{specifier}\"")?;
        }
        writeln!(f, ":")?;
        write!(f, "{}", self.record)
    }
}

impl Display for FlatPackageRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let FlatPackageRecord { version, resolved, integrity, dependencies } = self;
        writeln!(f, "  version \"{version}\"")?;
        writeln!(f, "  resolved \"{resolved}\"")?;
        if let Some(integrity) = integrity {
            writeln!(f, "  integrity \"{integrity}\"")?;
        }
        let Some(dependencies) = dependencies.as_ref().filter(|map| !map.is_empty()) else {
            return Ok(());
        };
        writeln!(f, "  dependencies:")?;
        for (name, version) in dependencies {
            let version = version.split_once('(').map_or(version.as_str(), |(version, _)| version);
            writeln!(f, "    \"{name}\" \"{version}\"")?;
        }
        Ok(())
    }
}

impl YarnLock {
    /// Render the text of `yarn.lock`.
    pub fn serialize(&self) -> String {
        self.to_string()
    }
}
