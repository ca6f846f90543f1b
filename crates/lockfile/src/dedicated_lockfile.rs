use crate::{prune_packages, Lockfile, ProjectSnapshot, ROOT_IMPORTER_ID};
use derive_more::{Display, Error};
use lock_export_diagnostics::miette::{self, Diagnostic};
use std::{
    collections::BTreeMap,
    path::{Component, Path},
};

/// Error when slicing a shared lockfile.
#[derive(Debug, Display, Error, Diagnostic)]
#[non_exhaustive]
pub enum SliceError {
    #[display("No importer with id {importer_id:?} in the lockfile")]
    #[diagnostic(
        code(lock_export_lockfile::importer_not_found),
        help("Is the project listed in the workspace of this lockfile?")
    )]
    NotFound {
        #[error(not(source))]
        importer_id: String,
    },
}

impl Lockfile {
    /// Extract the part of a shared lockfile that belongs to `importer_id` and its descendants.
    ///
    /// Ids of the surviving importers are made relative to `importer_id` (which becomes `.`),
    /// dependencies linking to other workspace projects are removed, and packages that are no
    /// longer reachable are pruned. `self` is left untouched.
    pub fn dedicated(&self, importer_id: &str) -> Result<Lockfile, SliceError> {
        if !self.importers.contains_key(importer_id) {
            return Err(SliceError::NotFound { importer_id: importer_id.to_string() });
        }

        let importers: BTreeMap<String, ProjectSnapshot> = self
            .importers
            .iter()
            .filter_map(|(id, snapshot)| {
                let relative_id = relative_importer_id(importer_id, id)?;
                Some((relative_id, snapshot.without_linked_dependencies()))
            })
            .collect();

        let packages = prune_packages(&importers, &self.packages);

        tracing::debug!(
            target: "lock_export::slice",
            %importer_id,
            importers = importers.len(),
            packages = packages.len(),
            "Sliced dedicated lockfile",
        );

        Ok(Lockfile { lockfile_version: self.lockfile_version, importers, packages })
    }
}

/// Rewrite `id` relative to `root`, or `None` when `id` is not `root` or one of its descendants.
fn relative_importer_id(root: &str, id: &str) -> Option<String> {
    if id == root {
        return Some(ROOT_IMPORTER_ID.to_string());
    }
    if root == ROOT_IMPORTER_ID {
        return Some(id.to_string());
    }
    id.strip_prefix(root)?.strip_prefix('/').map(str::to_string)
}

/// Compute the importer id of `project_dir` within the lockfile of `lockfile_dir`.
///
/// Components are joined with `/` on every platform; the lockfile directory itself is `.`.
/// Returns `None` when `project_dir` is not inside `lockfile_dir`.
pub fn importer_id(lockfile_dir: &Path, project_dir: &Path) -> Option<String> {
    let relative = project_dir.strip_prefix(lockfile_dir).ok()?;
    let segments: Vec<_> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy()),
            _ => None,
        })
        .collect();
    if segments.is_empty() {
        return Some(ROOT_IMPORTER_ID.to_string());
    }
    Some(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use text_block_macros::text_block_fnl;

    const WORKSPACE_LOCKFILE: &str = text_block_fnl! {
        "lockfileVersion: '6.0'"
        ""
        "importers:"
        ""
        "  .:"
        "    devDependencies:"
        "      typescript:"
        "        specifier: ^5.0.0"
        "        version: 5.1.6"
        ""
        "  packages/a:"
        "    dependencies:"
        "      b:"
        "        specifier: workspace:*"
        "        version: link:../b"
        "      lodash:"
        "        specifier: ^4.17.0"
        "        version: 4.17.21"
        ""
        "  packages/a/nested:"
        "    dependencies:"
        "      is-odd:"
        "        specifier: ^3.0.0"
        "        version: 3.0.1"
        ""
        "  packages/ab:"
        "    dependencies:"
        "      is-number:"
        "        specifier: ^7.0.0"
        "        version: 7.0.0"
        ""
        "  packages/b:"
        "    dependencies:"
        "      is-number:"
        "        specifier: ^6.0.0"
        "        version: 6.0.0"
        ""
        "packages:"
        ""
        "  /is-number@6.0.0:"
        "    resolution: {integrity: sha512-Wu1VHeILBK8KAWJUAiSZQX94GmOE45Rg6/538fKwiloUu21KncEkYGPqob2oSZ5mUT73vLGrHQjKw3KMPwfDzg==}"
        "    dev: false"
        ""
        "  /is-number@7.0.0:"
        "    resolution: {integrity: sha512-41Cifkg6e8TylSpdtTpeLVMqvSBEVzTttHvERD741+pnZ8ANv0004MRL43QKPDlK9cGvNp6NZWZUBlbGXYxxng==}"
        "    dev: false"
        ""
        "  /is-odd@3.0.1:"
        "    resolution: {integrity: sha512-CQpnWPrDwmP1+SMHXZhtLtJv90yiyVfluGsX5iNCVkrhQtU3TQHsUWPG9wkdk9Lgd5yNpAg9jQEo90CBaXgWMA==}"
        "    dependencies:"
        "      is-number: 6.0.0"
        "    dev: false"
        ""
        "  /lodash@4.17.21:"
        "    resolution: {integrity: sha512-v2kDEe57lecTulaDIuNTPy3Ry4gLGJ6Z1O3vE1krgXZNrsQ+LFTGHVxVjcXPs17LhbZVGedAJv8XZ1tvj5FvSg==}"
        "    dev: false"
        ""
        "  /typescript@5.1.6:"
        "    resolution: {integrity: sha512-zaWCozRZ6DLEWAWFrVDz1H6FVXzUSfTy5FUMWsQlU8Ym5JP9eO4xkTIROFCQvhQf61z6O/G6ugw3SgAnvvm+HA==}"
        "    dev: true"
    };

    fn lockfile() -> Lockfile {
        Lockfile::parse(WORKSPACE_LOCKFILE).unwrap()
    }

    #[test]
    fn slice_project_with_descendant() {
        let shared = lockfile();
        let dedicated = shared.dedicated("packages/a").unwrap();
        dbg!(&dedicated);

        assert_eq!(dedicated.importers.keys().collect::<Vec<_>>(), [".", "nested"]);
        let root = &dedicated.importers["."];
        assert_eq!(root.specifiers.keys().collect::<Vec<_>>(), ["lodash"]);
        assert!(root.all_dependencies().all(|(_, reference)| !reference.starts_with("link:")));
        assert_eq!(
            dedicated.packages.keys().collect::<Vec<_>>(),
            ["/is-number/6.0.0", "/is-odd/3.0.1", "/lodash/4.17.21"],
        );
        assert_eq!(dedicated.lockfile_version, shared.lockfile_version);
    }

    #[test]
    fn slice_leaf_project() {
        let dedicated = lockfile().dedicated("packages/b").unwrap();
        assert_eq!(dedicated.importers.keys().collect::<Vec<_>>(), ["."]);
        assert_eq!(dedicated.packages.keys().collect::<Vec<_>>(), ["/is-number/6.0.0"]);
    }

    #[test]
    fn sibling_with_common_prefix_is_not_a_descendant() {
        let dedicated = lockfile().dedicated("packages/a").unwrap();
        assert!(!dedicated.importers.contains_key("b"));
        assert!(!dedicated.packages.contains_key("/is-number/7.0.0"));
    }

    #[test]
    fn slice_root_keeps_every_importer() {
        let dedicated = lockfile().dedicated(".").unwrap();
        assert_eq!(
            dedicated.importers.keys().collect::<Vec<_>>(),
            [".", "packages/a", "packages/a/nested", "packages/ab", "packages/b"],
        );
        assert_eq!(dedicated.packages.len(), 5);
    }

    #[test]
    fn source_is_not_mutated() {
        let shared = lockfile();
        let before = shared.clone();
        shared.dedicated("packages/a").unwrap();
        shared.dedicated("packages/b").unwrap();
        assert_eq!(shared, before);
    }

    #[test]
    fn unknown_importer() {
        let error = lockfile().dedicated("packages/c").unwrap_err();
        dbg!(&error);
        assert!(matches!(&error, SliceError::NotFound { importer_id } if importer_id == "packages/c"));
        assert_eq!(error.to_string(), r#"No importer with id "packages/c" in the lockfile"#);
    }

    #[test]
    fn unresolved_specifier_survives_slicing() {
        let yaml = text_block_fnl! {
            "lockfileVersion: '6.0'"
            "importers:"
            "  packages/a:"
            "    specifiers:"
            "      missing: ^1.0.0"
            "    dependencies:"
            "      b:"
            "        specifier: workspace:*"
            "        version: link:../b"
            "      lodash:"
            "        specifier: ^4.17.0"
            "        version: 4.17.21"
            "  packages/b: {}"
            "packages:"
            "  /lodash@4.17.21:"
            "    resolution: {integrity: sha512-v2kDEe57lecTulaDIuNTPy3Ry4gLGJ6Z1O3vE1krgXZNrsQ+LFTGHVxVjcXPs17LhbZVGedAJv8XZ1tvj5FvSg==}"
        };
        let dedicated = Lockfile::parse(yaml).unwrap().dedicated("packages/a").unwrap();
        let root = &dedicated.importers["."];
        assert_eq!(root.specifiers.keys().collect::<Vec<_>>(), ["lodash", "missing"]);
        assert_eq!(root.resolved_reference("missing"), None);
        assert_eq!(root.resolved_reference("b"), None);
    }

    #[test]
    fn importer_id_of_directories() {
        let root = Path::new("/workspace");
        assert_eq!(importer_id(root, root).as_deref(), Some("."));
        assert_eq!(importer_id(root, &root.join("packages").join("a")).as_deref(), Some("packages/a"));
        assert_eq!(importer_id(root, Path::new("/elsewhere")), None);
    }
}
