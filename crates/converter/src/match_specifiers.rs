use derive_more::{Display, Error};
use itertools::Itertools;
use lock_export_diagnostics::miette::{self, Diagnostic};
use lock_export_lockfile::{dependency_path_of, without_peers_suffix, Lockfile, PackageSnapshot};

/// A dependency name and the specifier it was declared with, paired with the key of the package
/// the specifier resolved to.
///
/// Specifiers of importers come from `package.json`. Dependencies of packages are pinned, so
/// their specifier is the resolved version without peers suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredDependency<'a> {
    pub name: &'a str,
    pub specifier: &'a str,
    pub dependency_path: String,
}

/// A package of the lockfile together with every declaration that resolves to it.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageWithSpecifiers<'a> {
    pub dependency_path: &'a str,
    pub snapshot: &'a PackageSnapshot,
    /// Declarations in order of discovery: importers first, then dependencies of packages.
    pub matching_dependencies: Vec<DeclaredDependency<'a>>,
}

/// Error when an importer declares a specifier it has no resolution for.
#[derive(Debug, Display, Error, Diagnostic)]
#[non_exhaustive]
pub enum MatchSpecifiersError {
    #[display("Importer {importer_id:?} declares {name}@{specifier} but does not resolve it")]
    #[diagnostic(
        code(lock_export_converter::unresolved_specifier),
        help("The lockfile is probably out of date, run `pnpm install` to update it")
    )]
    Resolution { importer_id: String, name: String, specifier: String },
}

/// Pair every package of `lockfile` with the declared dependencies that resolve to it.
///
/// Every package is present in the result, in the order of the `packages` map, even those no
/// declaration resolves to.
pub fn match_specifiers(
    lockfile: &Lockfile,
) -> Result<Vec<PackageWithSpecifiers<'_>>, MatchSpecifiersError> {
    let mut groups = declared_dependencies(lockfile)?
        .into_iter()
        .into_group_map_by(|dependency| dependency.dependency_path.clone());

    let packages = lockfile
        .packages
        .iter()
        .map(|(dependency_path, snapshot)| PackageWithSpecifiers {
            matching_dependencies: groups.remove(dependency_path).unwrap_or_default(),
            dependency_path: dependency_path.as_str(),
            snapshot,
        })
        .collect();

    Ok(packages)
}

/// Flatten the declarations of every importer and every package.
fn declared_dependencies(
    lockfile: &Lockfile,
) -> Result<Vec<DeclaredDependency<'_>>, MatchSpecifiersError> {
    let mut declared = Vec::new();

    for (importer_id, snapshot) in &lockfile.importers {
        for (name, specifier) in &snapshot.specifiers {
            let (name, specifier) = (name.as_str(), specifier.as_str());
            let Some(reference) = snapshot.resolved_reference(name) else {
                return Err(MatchSpecifiersError::Resolution {
                    importer_id: importer_id.clone(),
                    name: name.to_string(),
                    specifier: specifier.to_string(),
                });
            };
            declared.push(DeclaredDependency {
                name,
                specifier,
                dependency_path: dependency_path_of(name, reference),
            });
        }
    }

    let transitive = lockfile.packages.values().flat_map(PackageSnapshot::all_dependencies).map(
        |(name, reference)| DeclaredDependency {
            name,
            specifier: without_peers_suffix(reference),
            dependency_path: dependency_path_of(name, reference),
        },
    );
    declared.extend(transitive);

    Ok(declared)
}
