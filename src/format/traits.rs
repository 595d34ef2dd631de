//! Trait definitions for annotation format implementations.

use std::path::{Path, PathBuf};

use crate::format::error::FormatError;
use crate::model::Annotation;

/// Trait for annotation export/import implementations.
///
/// Each format (CSV, PDF, native JSON) implements this trait to turn the
/// session's annotations into a file, and optionally to read them back.
pub trait AnnotationFormat: Send + Sync {
    /// Unique identifier for this format (e.g., "csv", "pdf", "json").
    fn id(&self) -> &'static str;

    /// Human-readable name for display.
    fn display_name(&self) -> &'static str;

    /// File extensions this format uses.
    fn extensions(&self) -> &[&'static str];

    /// File name used when the user does not give an output path.
    fn default_filename(&self) -> &'static str;

    /// Whether [`AnnotationFormat::import`] is implemented.
    fn supports_import(&self) -> bool {
        false
    }

    /// Serialize annotations to an in-memory buffer.
    fn export_to_bytes(
        &self,
        annotations: &[Annotation],
        options: &ExportOptions,
    ) -> Result<(Vec<u8>, ExportResult), FormatError>;

    /// Export annotations to the specified file.
    ///
    /// An empty slice is rejected with [`FormatError::Empty`] so callers never
    /// produce a header-only file.
    fn export(
        &self,
        annotations: &[Annotation],
        path: &Path,
        options: &ExportOptions,
    ) -> Result<ExportResult, FormatError> {
        if annotations.is_empty() {
            return Err(FormatError::Empty);
        }

        log::info!("Exporting {} annotations to {:?}", self.display_name(), path);

        if !options.overwrite && path.exists() {
            return Err(FormatError::Io(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("{} already exists", path.display()),
            )));
        }

        if options.create_parent_dirs {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
        }

        let (bytes, mut result) = self.export_to_bytes(annotations, options)?;
        std::fs::write(path, &bytes)?;
        result.files_created.push(path.to_path_buf());

        log::info!(
            "Exported {} annotations ({} warnings)",
            result.annotations_exported,
            result.warnings.len()
        );

        Ok(result)
    }

    /// Read annotations back from a file previously written by this format.
    fn import(&self, _path: &Path) -> Result<Vec<Annotation>, FormatError> {
        Err(FormatError::UnsupportedOperation(format!(
            "{} cannot be imported",
            self.display_name()
        )))
    }
}

/// Options for export operations.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Replace an existing file at the output path.
    pub overwrite: bool,

    /// Create missing parent directories of the output path.
    pub create_parent_dirs: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            overwrite: true,
            create_parent_dirs: true,
        }
    }
}

impl ExportOptions {
    /// Create new export options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether an existing file may be replaced.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

/// Result of an export operation.
#[derive(Debug, Default)]
pub struct ExportResult {
    /// Number of annotations exported.
    pub annotations_exported: usize,

    /// Warnings generated during export (e.g., replaced characters).
    pub warnings: Vec<FormatWarning>,

    /// Files created during export.
    pub files_created: Vec<PathBuf>,
}

impl ExportResult {
    /// Create a result for `count` exported annotations.
    pub fn with_count(count: usize) -> Self {
        Self {
            annotations_exported: count,
            ..Self::default()
        }
    }

    /// Add a warning to the result.
    pub fn add_warning(&mut self, warning: FormatWarning) {
        self.warnings.push(warning);
    }

    /// Check if there were any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Warning generated during format conversion.
#[derive(Debug, Clone)]
pub struct FormatWarning {
    /// Index of the annotation this warning relates to (if applicable).
    pub index: Option<usize>,

    /// Human-readable warning message.
    pub message: String,
}

impl FormatWarning {
    /// Create a new warning.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            index: None,
            message: message.into(),
        }
    }

    /// Set the annotation index this warning relates to.
    pub fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}
