//! Native session JSON format implementation.
//!
//! The only format that keeps full file paths. See [`SessionData`] for the
//! versioning rules.

use std::path::Path;

use crate::format::error::FormatError;
use crate::format::session::SessionData;
use crate::format::traits::{AnnotationFormat, ExportOptions, ExportResult};
use crate::model::Annotation;

/// Native session JSON format.
pub struct SessionJsonFormat;

impl AnnotationFormat for SessionJsonFormat {
    fn id(&self) -> &'static str {
        "json"
    }

    fn display_name(&self) -> &'static str {
        "Session (JSON)"
    }

    fn extensions(&self) -> &[&'static str] {
        &["json"]
    }

    fn default_filename(&self) -> &'static str {
        "annotations.json"
    }

    fn supports_import(&self) -> bool {
        true
    }

    fn export_to_bytes(
        &self,
        annotations: &[Annotation],
        _options: &ExportOptions,
    ) -> Result<(Vec<u8>, ExportResult), FormatError> {
        let session = SessionData::from_annotations(annotations);
        let json = serde_json::to_string_pretty(&session)?;

        Ok((json.into_bytes(), ExportResult::with_count(annotations.len())))
    }

    fn import(&self, path: &Path) -> Result<Vec<Annotation>, FormatError> {
        log::info!("Importing session from {:?}", path);

        if !path.is_file() {
            return Err(FormatError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let json = std::fs::read_to_string(path)?;
        let session: SessionData = serde_json::from_str(&json)?;

        if !SessionData::is_version_readable(&session.version) {
            return Err(FormatError::VersionMismatch {
                expected: SessionData::CURRENT_VERSION.to_string(),
                found: session.version,
            });
        }

        if SessionData::is_newer_minor(&session.version) {
            log::warn!(
                "Session version {} is newer than {}; unknown fields were ignored",
                session.version,
                SessionData::CURRENT_VERSION
            );
        }

        log::info!(
            "Imported {} annotations (format version {})",
            session.annotations.len(),
            session.version
        );

        Ok(session.annotations)
    }
}
