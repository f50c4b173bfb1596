//! Version representation for artifact selection and schema format checks.
//!
//! Repository directories and schema `formatVersion` values both use dotted
//! numeric versions, optionally with a `v` prefix and a pre-release suffix
//! (`1.4.0-SNAPSHOT`).
use std::cmp::Ordering;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A parsed version.
///
/// Accepts formats like:
/// - `1`, `1.4`, `1.4.2` (missing components default to `0`)
/// - `v1.4.2` ('v' prefix optional)
/// - `1.4.2-SNAPSHOT` (pre-release; orders before `1.4.2`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Version {
    /// Original version string as written in configuration, a schema, or a directory name.
    pub version_string: String,
    /// Major version component (e.g., `1` in `v1.4.2`).
    pub major: u32,
    /// Minor version component (e.g., `4` in `v1.4.2`).
    pub minor: u32,
    /// Patch component (e.g., `2` in `v1.4.2`).
    pub patch: u32,
    /// Pre-release label (e.g., `SNAPSHOT` in `1.4.2-SNAPSHOT`).
    pub pre_release: Option<String>,
}

// Equality follows the ordering: `v1.2` and `1.2.0` are the same version.
impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool { self.cmp(other) == Ordering::Equal }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch)).then_with(
            || match (&self.pre_release, &other.pre_release) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            },
        )
    }
}

/// Errors that can occur while parsing versions.
#[derive(Error, Debug)]
pub enum VersionError {
    /// The provided string did not match the expected version format.
    #[error("Invalid version format: {0}")]
    InvalidFormat(String),
    /// A numeric parse or regex error occurred.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl Version {
    /// Parse a `Version` from a string in the `[v]MAJOR[.MINOR[.PATCH]][-PRE]` format.
    pub fn from_string(s: &str) -> std::result::Result<Self, VersionError> {
        let re = Regex::new(r"^[vV]?(\d+)(?:\.(\d+))?(?:\.(\d+))?(?:-([0-9A-Za-z.-]+))?$")
            .map_err(|e: regex::Error| VersionError::Parse(e.to_string()))?;
        let caps =
            re.captures(s.trim()).ok_or_else(|| VersionError::InvalidFormat(s.to_string()))?;

        let component = |idx: usize| -> Result<u32, VersionError> {
            match caps.get(idx) {
                Some(m) => m
                    .as_str()
                    .parse()
                    .map_err(|e: std::num::ParseIntError| VersionError::Parse(e.to_string())),
                None => Ok(0),
            }
        };

        Ok(Self {
            version_string: s.to_string(),
            major: component(1)?,
            minor: component(2)?,
            patch: component(3)?,
            pre_release: caps.get(4).map(|m| m.as_str().to_string()),
        })
    }

    /// Return the original version string.
    pub fn as_str(&self) -> &str { &self.version_string }

    /// Get the major version component.
    pub fn major(&self) -> u32 { self.major }

    /// Render as `MAJOR.MINOR.PATCH`, dropping prefix and pre-release label.
    pub fn release(&self) -> String { format!("{}.{}.{}", self.major, self.minor, self.patch) }

    /// Whether this version carries a pre-release label.
    pub fn is_pre_release(&self) -> bool { self.pre_release.is_some() }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.version_string)
    }
}

impl std::str::FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> { Self::from_string(s) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string() {
        let version = Version::from_string("v1.2.3").expect("valid version");
        assert_eq!(version.version_string, "v1.2.3");
        assert_eq!(version.major, 1);
        assert_eq!(version.minor, 2);
        assert_eq!(version.patch, 3);
        assert_eq!(version.pre_release, None);

        let short = Version::from_string("2").expect("major only");
        assert_eq!((short.major, short.minor, short.patch), (2, 0, 0));

        let snapshot = Version::from_string("1.4.0-SNAPSHOT").expect("pre-release");
        assert_eq!(snapshot.pre_release.as_deref(), Some("SNAPSHOT"));
        assert_eq!(snapshot.release(), "1.4.0");
    }

    #[test]
    fn test_invalid() {
        for bad in ["", "latest", "1.x", "1.2.3.4"] {
            match Version::from_string(bad) {
                Err(VersionError::InvalidFormat(s)) => assert_eq!(s, bad),
                other => panic!("expected InvalidFormat for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_ordering() {
        let parse = |s: &str| Version::from_string(s).expect("valid version");
        assert!(parse("1.10.0") > parse("1.9.9"));
        assert!(parse("2.0") > parse("1.99.99"));
        assert!(parse("1.4.0") > parse("1.4.0-SNAPSHOT"));
        assert_eq!(parse("v1.2").cmp(&parse("1.2.0")), Ordering::Equal);
        assert_eq!(parse("v1.2"), parse("1.2.0"));
        assert_ne!(parse("1.2.0"), parse("1.2.0-rc1"));

        let mut versions = vec![parse("1.0.1"), parse("0.9"), parse("1.0.0-rc1"), parse("1.0.0")];
        versions.sort();
        let ordered: Vec<&str> = versions.iter().map(|v| v.as_str()).collect();
        assert_eq!(ordered, vec!["0.9", "1.0.0-rc1", "1.0.0", "1.0.1"]);
    }

    #[test]
    fn test_from_str_and_display() {
        let version: Version = "v3.1".parse().expect("valid version");
        assert_eq!(version.to_string(), "v3.1");
        assert_eq!(version.major(), 3);
    }
}
