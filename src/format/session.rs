//! Session data structure for the native JSON format.
//!
//! Unlike the CSV and PDF exports, the session file keeps full file paths so a
//! later run can pick up exactly where the previous one stopped.
//!
//! # Versioning
//!
//! The file carries a `MAJOR.MINOR.PATCH` version. Files with the same major
//! version are readable; a newer minor version is read with a warning.

use serde::{Deserialize, Serialize};

use crate::model::Annotation;

/// Serialized annotation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    /// Format version for compatibility checking.
    pub version: String,

    /// Name of the tool that wrote the file.
    #[serde(default)]
    pub tool: String,

    /// Annotations in insertion order.
    pub annotations: Vec<Annotation>,
}

impl SessionData {
    /// Current version of the session format.
    pub const CURRENT_VERSION: &'static str = "1.0.0";

    /// Major version number for compatibility checking.
    pub const VERSION_MAJOR: u32 = 1;

    /// Minor version number.
    pub const VERSION_MINOR: u32 = 0;

    /// Build a session from a slice of annotations.
    pub fn from_annotations(annotations: &[Annotation]) -> Self {
        Self {
            version: Self::CURRENT_VERSION.to_string(),
            tool: format!("{} {}", crate::constants::APP_NAME, env!("CARGO_PKG_VERSION")),
            annotations: annotations.to_vec(),
        }
    }

    /// Parse a version string into (major, minor, patch) components.
    pub fn parse_version(version: &str) -> Option<(u32, u32, u32)> {
        let mut parts = version.split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next()?.parse().ok()?;
        let patch = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some((major, minor, patch))
    }

    /// Files with the same major version can be read.
    pub fn is_version_readable(file_version: &str) -> bool {
        matches!(
            Self::parse_version(file_version),
            Some((major, _, _)) if major == Self::VERSION_MAJOR
        )
    }

    /// Readable files written by a newer minor version may carry fields we drop.
    pub fn is_newer_minor(file_version: &str) -> bool {
        matches!(
            Self::parse_version(file_version),
            Some((major, minor, _)) if major == Self::VERSION_MAJOR && minor > Self::VERSION_MINOR
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parsing() {
        assert_eq!(SessionData::parse_version("1.0.0"), Some((1, 0, 0)));
        assert_eq!(SessionData::parse_version("10.20.30"), Some((10, 20, 30)));
        assert_eq!(SessionData::parse_version("invalid"), None);
        assert_eq!(SessionData::parse_version("1.2"), None);
        assert_eq!(SessionData::parse_version("1.2.3.4"), None);
    }

    #[test]
    fn test_version_readable() {
        assert!(SessionData::is_version_readable(SessionData::CURRENT_VERSION));
        assert!(SessionData::is_version_readable("1.4.0"));
        assert!(!SessionData::is_version_readable("2.0.0"));
        assert!(!SessionData::is_version_readable("0.9.0"));
        assert!(!SessionData::is_version_readable("garbage"));
    }

    #[test]
    fn test_newer_minor_detection() {
        assert!(SessionData::is_newer_minor("1.1.0"));
        assert!(!SessionData::is_newer_minor("1.0.7"));
        assert!(!SessionData::is_newer_minor("2.1.0"));
    }

    #[test]
    fn test_from_annotations_keeps_order() {
        let anns = vec![Annotation::new("/a/b.png", "x"), Annotation::new("/c/d.wav", "y")];
        let session = SessionData::from_annotations(&anns);
        assert_eq!(session.version, SessionData::CURRENT_VERSION);
        assert_eq!(session.annotations, anns);
        assert!(session.tool.starts_with("MRLabel"));
    }
}
