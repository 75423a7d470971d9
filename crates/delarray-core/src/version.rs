//! Schema versions and version-string parsing.
//!
//! Every node of a delayed-operation tree may declare the schema version it
//! was written against. Behavioral switches only ever consult the
//! `(major, minor)` pair; the patch component is carried for completeness
//! but never gates validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A `(major, minor, patch)` schema version.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Sentinel for trees written before versioning existed. Nodes without
    /// a declared version are validated under the oldest rules.
    pub const OLDEST: Version = Version {
        major: 0,
        minor: 99,
        patch: 0,
    };

    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// `true` if this version is at or below `major.minor`, ignoring patch.
    pub fn at_or_below(&self, major: u32, minor: u32) -> bool {
        self.major < major || (self.major == major && self.minor <= minor)
    }

    /// `true` if this version is strictly below `major.minor`, ignoring patch.
    pub fn lt(&self, major: u32, minor: u32) -> bool {
        self.major < major || (self.major == major && self.minor < minor)
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Component of a version string, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Component {
    Major,
    Minor,
    Patch,
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Component::Major => "major",
            Component::Minor => "minor",
            Component::Patch => "patch",
        })
    }
}

/// Failure modes of [`parse_version_string`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("version string is empty")]
    Empty,

    #[error("missing the {0} version")]
    Missing(Component),

    #[error("non-digit character in the {0} version")]
    NonDigit(Component),

    #[error("leading zeros are not allowed in the {0} version")]
    LeadingZeros(Component),

    #[error("{0} version is too large")]
    Overflow(Component),
}

/// Parses a `<major>.<minor>` or `<major>.<minor>.<patch>` string.
///
/// Each component is a run of decimal digits with no leading zeros (the
/// literal `0` itself is allowed). A missing patch component defaults to
/// zero. The historic literal `"1.0.0"` predates the two-component format
/// and parses to `1.0.0` like any other three-component string.
pub fn parse_version_string(version_string: &str) -> Result<Version, VersionError> {
    if version_string.is_empty() {
        return Err(VersionError::Empty);
    }

    let mut parts = version_string.split('.');
    let major = parse_component(parts.next(), Component::Major)?;
    let minor = parse_component(parts.next(), Component::Minor)?;
    let patch = match parts.next() {
        Some(text) => parse_component(Some(text), Component::Patch)?,
        None => 0,
    };
    if parts.next().is_some() {
        return Err(VersionError::NonDigit(Component::Patch));
    }

    Ok(Version::new(major, minor, patch))
}

fn parse_component(text: Option<&str>, which: Component) -> Result<u32, VersionError> {
    let text = match text {
        Some(text) if !text.is_empty() => text,
        _ => return Err(VersionError::Missing(which)),
    };

    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VersionError::NonDigit(which));
    }
    if text.len() > 1 && text.starts_with('0') {
        return Err(VersionError::LeadingZeros(which));
    }

    text.parse::<u32>().map_err(|_| VersionError::Overflow(which))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_triples() {
        assert_eq!(parse_version_string("1.0.0").unwrap(), Version::new(1, 0, 0));
        assert_eq!(
            parse_version_string("123.45.6").unwrap(),
            Version::new(123, 45, 6)
        );
    }

    #[test]
    fn parses_two_component_forms() {
        assert_eq!(parse_version_string("1.1").unwrap(), Version::new(1, 1, 0));
        assert_eq!(parse_version_string("0.99").unwrap(), Version::OLDEST);
    }

    #[test]
    fn rejects_malformed_strings() {
        assert_eq!(parse_version_string(""), Err(VersionError::Empty));
        assert_eq!(
            parse_version_string("1"),
            Err(VersionError::Missing(Component::Minor))
        );
        assert_eq!(
            parse_version_string("1."),
            Err(VersionError::Missing(Component::Minor))
        );
        assert_eq!(
            parse_version_string("1.0."),
            Err(VersionError::Missing(Component::Patch))
        );
        assert_eq!(
            parse_version_string("a.1.1"),
            Err(VersionError::NonDigit(Component::Major))
        );
        assert_eq!(
            parse_version_string("1.a.1"),
            Err(VersionError::NonDigit(Component::Minor))
        );
        assert_eq!(
            parse_version_string("1.0.a"),
            Err(VersionError::NonDigit(Component::Patch))
        );
        assert_eq!(
            parse_version_string("1.01.1"),
            Err(VersionError::LeadingZeros(Component::Minor))
        );
        assert_eq!(
            parse_version_string("1.0.00"),
            Err(VersionError::LeadingZeros(Component::Patch))
        );
        assert_eq!(
            parse_version_string("1.0.0.0"),
            Err(VersionError::NonDigit(Component::Patch))
        );
    }

    #[test]
    fn gating_helpers_ignore_patch() {
        let v = Version::new(1, 0, 5);
        assert!(v.at_or_below(1, 0));
        assert!(!v.at_or_below(0, 99));
        assert!(v.lt(1, 1));
        assert!(!v.lt(1, 0));
        assert!(Version::OLDEST.lt(1, 1));
    }

    #[test]
    fn error_messages_name_the_component() {
        let err = parse_version_string("1.x").unwrap_err();
        assert!(err.to_string().contains("minor version"));
        let err = parse_version_string("1.0.").unwrap_err();
        assert!(err.to_string().contains("patch version"));
        let err = parse_version_string("01.0.0").unwrap_err();
        assert!(err.to_string().contains("leading zeros"));
    }
}
