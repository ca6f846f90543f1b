use derive_more::{Display, Error};
use serde::Deserialize;
use std::{num::ParseIntError, str::FromStr};

/// Version struct used in a lockfile.
///
/// It contains only major and minor.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[display("{major}.{minor}")]
#[serde(try_from = "ComVerSerde")]
pub struct ComVer {
    pub major: u16,
    pub minor: u16,
}

impl ComVer {
    /// Create a comver struct.
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }
}

/// Error when parsing [`ComVer`] from a string.
#[derive(Debug, Display, Error)]
pub enum ParseComVerError {
    #[display("Dot is missing")]
    MissingDot,
    #[display("Major is not a valid number: {_0}")]
    InvalidMajor(ParseIntError),
    #[display("Minor is not a valid number: {_0}")]
    InvalidMinor(ParseIntError),
}

impl FromStr for ComVer {
    type Err = ParseComVerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (major, minor) = s.split_once('.').ok_or(ParseComVerError::MissingDot)?;
        let major = major.parse::<u16>().map_err(ParseComVerError::InvalidMajor)?;
        let minor = minor.parse::<u16>().map_err(ParseComVerError::InvalidMinor)?;
        Ok(ComVer::new(major, minor))
    }
}

/// Older lockfiles write `lockfileVersion: 5.4` which YAML reads as a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum ComVerSerde {
    Text(String),
    Number(f64),
}

impl TryFrom<ComVerSerde> for ComVer {
    type Error = ParseComVerError;
    fn try_from(value: ComVerSerde) -> Result<Self, Self::Error> {
        match value {
            ComVerSerde::Text(text) => text.parse(),
            ComVerSerde::Number(number) if number.fract() == 0.0 => format!("{number}.0").parse(),
            ComVerSerde::Number(number) => number.to_string().parse(),
        }
    }
}
