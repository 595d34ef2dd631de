//! CSV table format implementation.
//!
//! Writes one row per annotation under a `file,label` header. The file column
//! holds the base name only, so exported tables do not leak local directory
//! layouts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::format::error::FormatError;
use crate::format::traits::{AnnotationFormat, ExportOptions, ExportResult};
use crate::model::Annotation;

/// Header columns, in order.
pub const CSV_COLUMNS: [&str; 2] = ["file", "label"];

#[derive(Serialize)]
struct CsvRow<'a> {
    file: &'a str,
    label: &'a str,
}

#[derive(Deserialize)]
struct CsvRecord {
    file: String,
    label: String,
}

/// CSV table format.
///
/// Supports:
/// - Import of tables written by this format (base names only)
///
/// Does not support:
/// - Full paths (the file column is reduced to the base name)
pub struct CsvFormat;

impl AnnotationFormat for CsvFormat {
    fn id(&self) -> &'static str {
        "csv"
    }

    fn display_name(&self) -> &'static str {
        "CSV table"
    }

    fn extensions(&self) -> &[&'static str] {
        &["csv"]
    }

    fn default_filename(&self) -> &'static str {
        "annotations.csv"
    }

    fn supports_import(&self) -> bool {
        true
    }

    fn export_to_bytes(
        &self,
        annotations: &[Annotation],
        _options: &ExportOptions,
    ) -> Result<(Vec<u8>, ExportResult), FormatError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(true)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        for ann in annotations {
            writer.serialize(CsvRow {
                file: ann.basename(),
                label: &ann.label,
            })?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| FormatError::Io(e.into_error()))?;

        Ok((bytes, ExportResult::with_count(annotations.len())))
    }

    fn import(&self, path: &Path) -> Result<Vec<Annotation>, FormatError> {
        log::info!("Importing CSV annotations from {:?}", path);

        if !path.is_file() {
            return Err(FormatError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        for column in CSV_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(FormatError::missing_field(column));
            }
        }

        let mut annotations = Vec::new();
        for record in reader.deserialize::<CsvRecord>() {
            let record = record?;
            annotations.push(Annotation::new(record.file, record.label));
        }

        log::info!("Imported {} annotations", annotations.len());
        Ok(annotations)
    }
}
