use derive_more::From;
use serde::{de, Deserialize, Deserializer};
use ssri::Integrity;

/// For tarball hosted remotely or locally.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TarballResolution {
    pub tarball: String,
    #[serde(default, deserialize_with = "optional_integrity")]
    pub integrity: Option<String>,
}

/// For standard package specification, with package name and version range.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryResolution {
    #[serde(deserialize_with = "integrity")]
    pub integrity: String,
}

/// For local directory on a filesystem.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryResolution {
    pub directory: String,
}

/// For git repository.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitResolution {
    pub repo: String,
    pub commit: String,
}

/// Represent the resolution object.
#[derive(Debug, Clone, PartialEq, Deserialize, From)]
#[serde(from = "ResolutionSerde")]
pub enum LockfileResolution {
    Tarball(TarballResolution),
    Registry(RegistryResolution),
    Directory(DirectoryResolution),
    Git(GitResolution),
}

impl LockfileResolution {
    /// Get the integrity field if available, exactly as written in the lockfile.
    pub fn integrity(&self) -> Option<&'_ str> {
        match self {
            LockfileResolution::Tarball(resolution) => resolution.integrity.as_deref(),
            LockfileResolution::Registry(resolution) => Some(resolution.integrity.as_str()),
            LockfileResolution::Directory(_) | LockfileResolution::Git(_) => None,
        }
    }
}

/// Check that the text is a valid subresource integrity, then keep it verbatim.
///
/// [`Integrity`] reorders hashes when displayed, so it is not kept.
fn integrity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let text = String::deserialize(deserializer)?;
    text.parse::<Integrity>().map_err(de::Error::custom)?;
    Ok(text)
}

fn optional_integrity<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    struct Checked(#[serde(deserialize_with = "integrity")] String);
    let checked = Option::<Checked>::deserialize(deserializer)?;
    Ok(checked.map(|Checked(text)| text))
}

/// Intermediate helper type for serde.
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum TaggedResolution {
    Directory(DirectoryResolution),
    Git(GitResolution),
}

/// Intermediate helper type for serde.
///
/// Tagged variants come first so that `type: git` never falls through to a looser shape.
#[derive(Deserialize)]
#[serde(untagged)]
enum ResolutionSerde {
    Tagged(TaggedResolution),
    Tarball(TarballResolution),
    Registry(RegistryResolution),
}

impl From<ResolutionSerde> for LockfileResolution {
    fn from(value: ResolutionSerde) -> Self {
        match value {
            ResolutionSerde::Tarball(resolution) => resolution.into(),
            ResolutionSerde::Registry(resolution) => resolution.into(),
            ResolutionSerde::Tagged(TaggedResolution::Directory(resolution)) => resolution.into(),
            ResolutionSerde::Tagged(TaggedResolution::Git(resolution)) => resolution.into(),
        }
    }
}
