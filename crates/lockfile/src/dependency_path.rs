use node_semver::Version;
use std::borrow::Cow;

/// Components of a registry dependency path such as `/@types/react/17.0.49(react@17.0.2)`.
///
/// Syntax: `[{host}]/{name}/{version}[{peers}]` where `{name}` spans two segments when scoped.
/// A version followed by `(...)` groups or by `_...` carries a peers suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyPath<'a> {
    pub host: Option<&'a str>,
    pub name: &'a str,
    pub version: &'a str,
    pub peers_suffix: Option<&'a str>,
}

impl<'a> DependencyPath<'a> {
    /// Parse a dependency path.
    ///
    /// Returns `None` when the path does not end with a valid semver version, which is the case
    /// for git and directory dependencies.
    pub fn parse(path: &'a str) -> Option<Self> {
        let (host, rest) = match path.strip_prefix('/') {
            Some(rest) => (None, rest),
            None => {
                let (host, rest) = path.split_once('/')?;
                (Some(host), rest)
            }
        };

        let name_len = if rest.starts_with('@') {
            let (scope, after_scope) = rest.split_once('/')?;
            let name = after_scope.split('/').next()?;
            scope.len() + 1 + name.len()
        } else {
            rest.split('/').next()?.len()
        };
        let name = &rest[..name_len];
        let version = rest.get(name_len + 1..).filter(|version| !version.is_empty())?;

        let (version, peers_suffix) = if version.contains('(') && version.ends_with(')') {
            let index = version.find('(')?;
            (&version[..index], Some(&version[index..]))
        } else if let Some((version, peers)) = version.split_once('_') {
            (version, Some(peers))
        } else {
            (version, None)
        };

        if name.is_empty() || Version::parse(version).is_err() {
            return None;
        }

        Some(DependencyPath { host, name, version, peers_suffix })
    }
}

/// Convert a dependency path of lockfile v6 (`/name@version`) into the in-memory form
/// (`/name/version`).
///
/// An `@` that belongs to the scope or to the peers suffix is never treated as the separator.
pub fn convert_v6_dependency_path(path: &str) -> Cow<'_, str> {
    let search_from = path.find("/@").map_or(1, |index| index + 2);
    let separator = path
        .get(search_from..)
        .and_then(|rest| rest.find('@'))
        .map(|index| index + search_from);
    let Some(separator) = separator else {
        return Cow::Borrowed(path);
    };
    if path.find('(').is_some_and(|parenthesis| separator > parenthesis) {
        return Cow::Borrowed(path);
    }
    Cow::Owned(format!("{}/{}", &path[..separator], &path[separator + 1..]))
}

/// Convert a resolved reference of lockfile v6 into the in-memory form.
///
/// Bare versions and local references are left untouched.
pub fn convert_v6_reference(reference: &str) -> Cow<'_, str> {
    if reference.starts_with("link:") || reference.starts_with("file:") {
        return Cow::Borrowed(reference);
    }
    if reference.contains('@') {
        return convert_v6_dependency_path(reference);
    }
    Cow::Borrowed(reference)
}
