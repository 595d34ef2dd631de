//! Format registry for discovering and accessing annotation formats.

use std::collections::HashMap;
use std::path::Path;

use crate::format::error::FormatError;
use crate::format::formats::{CsvFormat, PdfFormat, SessionJsonFormat};
use crate::format::traits::AnnotationFormat;

/// Registry of available annotation formats.
///
/// All built-in formats are registered automatically on creation.
pub struct FormatRegistry {
    formats: HashMap<&'static str, Box<dyn AnnotationFormat>>,
}

impl FormatRegistry {
    /// Create a new registry with all built-in formats registered.
    pub fn new() -> Self {
        let mut registry = Self {
            formats: HashMap::new(),
        };

        registry.register(Box::new(CsvFormat));
        registry.register(Box::new(PdfFormat));
        registry.register(Box::new(SessionJsonFormat));

        registry
    }

    /// Register a format implementation, replacing any with the same id.
    pub fn register(&mut self, format: Box<dyn AnnotationFormat>) {
        self.formats.insert(format.id(), format);
    }

    /// Get a format by its ID.
    pub fn get(&self, id: &str) -> Option<&dyn AnnotationFormat> {
        self.formats.get(id).map(|f| f.as_ref())
    }

    /// Get a format by ID, or an [`FormatError::UnknownFormat`] error.
    pub fn require(&self, id: &str) -> Result<&dyn AnnotationFormat, FormatError> {
        self.get(id).ok_or_else(|| FormatError::unknown_format(id))
    }

    /// Find formats by file extension.
    pub fn by_extension(&self, ext: &str) -> Vec<&dyn AnnotationFormat> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        self.formats
            .values()
            .filter(|f| f.extensions().iter().any(|e| *e == ext))
            .map(|f| f.as_ref())
            .collect()
    }

    /// Pick a format for a file path based on its extension.
    pub fn for_path(&self, path: &Path) -> Option<&dyn AnnotationFormat> {
        let ext = path.extension()?.to_str()?;
        self.by_extension(ext).into_iter().next()
    }

    /// Get all registered formats, ordered by ID.
    pub fn all(&self) -> Vec<&dyn AnnotationFormat> {
        let mut formats: Vec<_> = self.formats.values().map(|f| f.as_ref()).collect();
        formats.sort_by_key(|f| f.id());
        formats
    }

    /// Get all format IDs, sorted.
    pub fn ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.formats.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Get formats that can be imported.
    pub fn import_formats(&self) -> Vec<&dyn AnnotationFormat> {
        self.all()
            .into_iter()
            .filter(|f| f.supports_import())
            .collect()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_formats() {
        let registry = FormatRegistry::new();

        assert!(registry.get("csv").is_some());
        assert!(registry.get("pdf").is_some());
        assert!(registry.get("json").is_some());
        assert!(registry.get("xlsx").is_none());
        assert_eq!(registry.ids(), vec!["csv", "json", "pdf"]);
    }

    #[test]
    fn test_require_unknown_format() {
        let registry = FormatRegistry::new();
        let err = registry.require("docx").err().unwrap();
        assert!(matches!(err, FormatError::UnknownFormat { ref id } if id == "docx"));
    }

    #[test]
    fn test_lookup_by_extension() {
        let registry = FormatRegistry::new();

        assert_eq!(registry.by_extension(".CSV")[0].id(), "csv");
        assert_eq!(
            registry.for_path(Path::new("out/report.pdf")).map(|f| f.id()),
            Some("pdf")
        );
        assert!(registry.for_path(Path::new("no_extension")).is_none());
    }

    #[test]
    fn test_import_formats() {
        let registry = FormatRegistry::new();
        let ids: Vec<_> = registry.import_formats().iter().map(|f| f.id()).collect();

        assert_eq!(ids, vec!["csv", "json"]);
    }
}
