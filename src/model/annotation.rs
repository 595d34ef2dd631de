//! Annotation record: a file path with a user-supplied label.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// A single (file, label) pair recorded by the user.
///
/// Only the path is stored; the file contents are never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Path of the annotated file, as entered or picked
    pub file: String,
    /// Free-form label text
    pub label: String,
}

impl Annotation {
    /// Create an annotation without validation.
    ///
    /// Use [`crate::model::AnnotationStore::add`] for user input.
    pub fn new(file: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            label: label.into(),
        }
    }

    /// Final path component of the file, used by every export.
    ///
    /// Paths without a final component (`/`, `..`) are returned unchanged.
    pub fn basename(&self) -> &str {
        Path::new(&self.file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.file)
    }

    /// Text line used by the PDF export: `"<basename> - <label>"`.
    pub fn summary_line(&self) -> String {
        format!("{} - {}", self.basename(), self.label)
    }
}
