use crate::DependencyReference;
use std::collections::{BTreeMap, BTreeSet};

/// Map of dependency names to resolved references.
pub type ResolvedDependencyMap = BTreeMap<String, String>;

/// Kinds of dependencies an importer may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyGroup {
    Prod,
    Dev,
    Optional,
}

impl DependencyGroup {
    /// All groups, in the order they are searched when resolving a specifier.
    pub const ALL: [DependencyGroup; 3] =
        [DependencyGroup::Prod, DependencyGroup::Dev, DependencyGroup::Optional];
}

/// Snapshot of a single project (importer).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProjectSnapshot {
    /// Specifiers as written in `package.json`, keyed by dependency name.
    pub specifiers: BTreeMap<String, String>,
    pub dependencies: Option<ResolvedDependencyMap>,
    pub dev_dependencies: Option<ResolvedDependencyMap>,
    pub optional_dependencies: Option<ResolvedDependencyMap>,
}

impl ProjectSnapshot {
    /// Lookup dependency map according to group.
    pub fn get_map_by_group(&self, group: DependencyGroup) -> Option<&'_ ResolvedDependencyMap> {
        match group {
            DependencyGroup::Prod => self.dependencies.as_ref(),
            DependencyGroup::Dev => self.dev_dependencies.as_ref(),
            DependencyGroup::Optional => self.optional_dependencies.as_ref(),
        }
    }

    fn get_map_by_group_mut(
        &mut self,
        group: DependencyGroup,
    ) -> Option<&'_ mut ResolvedDependencyMap> {
        match group {
            DependencyGroup::Prod => self.dependencies.as_mut(),
            DependencyGroup::Dev => self.dev_dependencies.as_mut(),
            DependencyGroup::Optional => self.optional_dependencies.as_mut(),
        }
    }

    /// Find the reference a declared dependency resolved to.
    ///
    /// Groups are searched in the order of [`DependencyGroup::ALL`] and the first hit wins.
    pub fn resolved_reference(&self, name: &str) -> Option<&'_ str> {
        DependencyGroup::ALL
            .into_iter()
            .flat_map(|group| self.get_map_by_group(group))
            .find_map(|map| map.get(name))
            .map(String::as_str)
    }

    /// Iterate over all resolved dependencies of every group.
    pub fn all_dependencies(&self) -> impl Iterator<Item = (&'_ str, &'_ str)> {
        DependencyGroup::ALL
            .into_iter()
            .flat_map(|group| self.get_map_by_group(group))
            .flat_map(|map| map.iter())
            .map(|(name, reference)| (name.as_str(), reference.as_str()))
    }

    /// Copy of the snapshot without dependencies that link to local directories.
    ///
    /// The specifiers of the removed dependencies are dropped as well, unless another group
    /// still resolves the same name. Other specifiers are kept as they are, resolved or not.
    pub fn without_linked_dependencies(&self) -> ProjectSnapshot {
        let mut snapshot = self.clone();
        let mut linked_names = BTreeSet::new();
        for group in DependencyGroup::ALL {
            if let Some(map) = snapshot.get_map_by_group_mut(group) {
                map.retain(|name, reference| {
                    let is_link = DependencyReference::parse(reference).is_link();
                    if is_link {
                        tracing::debug!(target: "lock_export::slice", %name, %reference, "Drop linked dependency");
                        linked_names.insert(name.clone());
                    }
                    !is_link
                });
            }
        }
        for name in linked_names {
            if snapshot.resolved_reference(&name).is_none() {
                snapshot.specifiers.remove(&name);
            }
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn map<const N: usize>(entries: [(&str, &str); N]) -> ResolvedDependencyMap {
        entries.into_iter().map(|(name, reference)| (name.to_string(), reference.to_string())).collect()
    }

    #[test]
    fn resolved_reference_priority() {
        let snapshot = ProjectSnapshot {
            specifiers: Default::default(),
            dependencies: Some(map([("a", "1.0.0")])),
            dev_dependencies: Some(map([("a", "2.0.0"), ("b", "2.0.0")])),
            optional_dependencies: Some(map([("b", "3.0.0"), ("c", "3.0.0")])),
        };
        assert_eq!(snapshot.resolved_reference("a"), Some("1.0.0"));
        assert_eq!(snapshot.resolved_reference("b"), Some("2.0.0"));
        assert_eq!(snapshot.resolved_reference("c"), Some("3.0.0"));
        assert_eq!(snapshot.resolved_reference("d"), None);
    }

    #[test]
    fn drop_linked_dependencies() {
        let snapshot = ProjectSnapshot {
            specifiers: map([
                ("foo", "workspace:*"),
                ("lodash", "^4.17.0"),
                ("bar", "workspace:^1.0.0"),
            ]),
            dependencies: Some(map([("foo", "link:../foo"), ("lodash", "4.17.21")])),
            dev_dependencies: Some(map([("bar", "link:../bar")])),
            optional_dependencies: None,
        };
        let received = snapshot.without_linked_dependencies();
        let expected = ProjectSnapshot {
            specifiers: map([("lodash", "^4.17.0")]),
            dependencies: Some(map([("lodash", "4.17.21")])),
            dev_dependencies: Some(map([])),
            optional_dependencies: None,
        };
        assert_eq!(received, expected);
        assert!(received.all_dependencies().all(|(_, reference)| !reference.starts_with("link:")));
    }

    #[test]
    fn keep_unresolved_specifiers_that_are_not_links() {
        let snapshot = ProjectSnapshot {
            specifiers: map([("foo", "workspace:*"), ("missing", "^1.0.0")]),
            dependencies: Some(map([("foo", "link:../foo")])),
            dev_dependencies: None,
            optional_dependencies: None,
        };
        let received = snapshot.without_linked_dependencies();
        assert_eq!(received.specifiers, map([("missing", "^1.0.0")]));
        assert_eq!(received.resolved_reference("missing"), None);
    }
}
