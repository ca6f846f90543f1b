use crate::without_peers_suffix;
use derive_more::Display;

/// Value of a resolved dependency inside an importer or a package snapshot.
///
/// There are exactly two encodings:
/// * `Version`: a bare version, optionally followed by a peers suffix,
///   e.g. `4.0.0` or `4.0.0(react@18.0.0)`.
/// * `DependencyPath`: an already canonical key of the `packages` map, as produced for
///   aliases (`/string-width/4.2.3`), git dependencies (`github.com/user/repo/abcdef`),
///   or links (`link:../foo`).
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum DependencyReference<'a> {
    Version(&'a str),
    DependencyPath(&'a str),
}

impl<'a> DependencyReference<'a> {
    /// Classify a reference string.
    pub fn parse(reference: &'a str) -> Self {
        if reference.starts_with(|char: char| char.is_ascii_digit()) {
            DependencyReference::Version(reference)
        } else {
            DependencyReference::DependencyPath(reference)
        }
    }

    /// The key of the `packages` map this reference points to.
    ///
    /// The peers suffix of a version is kept since distinct peer resolutions are distinct packages.
    pub fn to_dependency_path(self, name: &str) -> String {
        match self {
            DependencyReference::Version(version) => format!("/{name}/{version}"),
            DependencyReference::DependencyPath(path) => path.to_string(),
        }
    }

    /// The reference without its peers suffix.
    pub fn without_peers_suffix(self) -> &'a str {
        match self {
            DependencyReference::Version(reference)
            | DependencyReference::DependencyPath(reference) => without_peers_suffix(reference),
        }
    }

    /// Whether this reference points at a local directory of the workspace.
    pub fn is_link(self) -> bool {
        matches!(self, DependencyReference::DependencyPath(path) if path.starts_with("link:"))
    }
}

/// Convert a resolved dependency of `name` into the key of the `packages` map.
pub fn dependency_path_of(name: &str, reference: &str) -> String {
    DependencyReference::parse(reference).to_dependency_path(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn classify() {
        macro_rules! case {
            ($input:expr => $variant:ident) => {{
                let input = $input;
                eprintln!("CASE: {input:?}");
                assert_eq!(DependencyReference::parse(input), DependencyReference::$variant(input));
            }};
        }

        case!("4.17.21" => Version);
        case!("4.0.0(react@18.0.0)" => Version);
        case!("1.0.0_react@17.0.2" => Version);
        case!("/string-width/4.2.3" => DependencyPath);
        case!("github.com/tauri-apps/tauri-plugin-log/abc123" => DependencyPath);
        case!("link:../foo" => DependencyPath);
    }

    #[test]
    fn to_dependency_path() {
        macro_rules! case {
            ($name:expr, $reference:expr => $output:expr) => {{
                let (name, reference) = ($name, $reference);
                eprintln!("CASE: {name:?}, {reference:?}");
                assert_eq!(dependency_path_of(name, reference), $output);
            }};
        }

        case!("lodash", "4.17.21" => "/lodash/4.17.21");
        case!("@types/node", "18.7.19" => "/@types/node/18.7.19");
        case!("react-dom", "18.0.0(react@18.0.0)" => "/react-dom/18.0.0(react@18.0.0)");
        case!("string-width-cjs", "/string-width/4.2.3" => "/string-width/4.2.3");
        case!("tauri-plugin-log", "github.com/tauri-apps/tauri-plugin-log/abc123" => "github.com/tauri-apps/tauri-plugin-log/abc123");
    }

    #[test]
    fn link() {
        assert!(DependencyReference::parse("link:../foo").is_link());
        assert!(!DependencyReference::parse("/link/1.0.0").is_link());
        assert!(!DependencyReference::parse("1.0.0").is_link());
    }

    #[test]
    fn strip_peers_suffix() {
        assert_eq!(DependencyReference::parse("4.0.0(react@18.0.0)").without_peers_suffix(), "4.0.0");
        assert_eq!(
            DependencyReference::parse("/foo/1.0.0(react@18.0.0)").without_peers_suffix(),
            "/foo/1.0.0",
        );
    }
}
