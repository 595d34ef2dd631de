//! Message handlers for MRLabel.
//!
//! Each handler processes one kind of message against the pieces of state it
//! needs, keeping `LabelerApp::update` a plain dispatcher. Handlers never
//! print; they answer with a [`Reply`] and append to the [`OutputLog`].

use std::path::{Path, PathBuf};

use crate::db::{self, DatabaseConfig};
use crate::format::{ExportOptions, FormatError, FormatRegistry};
use crate::message::{Notice, Reply};
use crate::model::{AnnotationStore, StoreError};
use crate::picker::FilePicker;
use crate::state::{FormState, OutputLog};

/// Handle a new value for the file path field.
pub fn handle_set_file(form: &mut FormState, value: String) -> Reply {
    log::debug!("File field: {:?}", value);
    form.file_path = value;
    Reply::None
}

/// Handle a new value for the label field.
pub fn handle_set_label(form: &mut FormState, value: String) -> Reply {
    log::debug!("Label field: {:?}", value);
    form.label = value;
    Reply::None
}

/// Fill the file path field from the file picker. Cancelling changes nothing.
pub fn handle_browse(form: &mut FormState, picker: &mut dyn FilePicker) -> Reply {
    match picker.pick_file() {
        Some(path) => {
            let path = path.to_string_lossy().into_owned();
            log::debug!("Picked file {:?}", path);
            form.file_path = path;
            Reply::None
        }
        None => {
            log::debug!("File selection cancelled");
            Reply::None
        }
    }
}

fn missing_info() -> Reply {
    Reply::Notice(Notice::warning("Missing Info", "File and label are required."))
}

/// Store the form fields as an annotation and clear the form.
///
/// With a missing field the store and the form are left untouched.
pub fn handle_submit(
    form: &mut FormState,
    store: &mut AnnotationStore,
    output: &mut OutputLog,
) -> Reply {
    match store.add(&form.file_path, &form.label) {
        Ok(ann) => {
            output.push(format!("Labeled: {} as {}", ann.basename(), ann.label));
            form.clear();
            Reply::None
        }
        Err(StoreError::MissingField { field }) => {
            log::debug!("Submit rejected: missing {}", field);
            missing_info()
        }
        Err(StoreError::Empty) => missing_info(),
    }
}

/// Store an annotation given directly as arguments.
pub fn handle_add(
    store: &mut AnnotationStore,
    output: &mut OutputLog,
    file: &str,
    label: &str,
) -> Reply {
    match store.add(file, label) {
        Ok(ann) => {
            output.push(format!("Labeled: {} as {}", ann.basename(), ann.label));
            Reply::None
        }
        Err(_) => missing_info(),
    }
}

/// Show all annotations as a `File` / `Label` table.
pub fn handle_view(store: &AnnotationStore) -> Reply {
    match store.table() {
        Ok(table) => Reply::Table(table),
        Err(_) => Reply::Notice(Notice::info("No data", "No annotations available.")),
    }
}

/// Export the store with the format `format_id`.
///
/// Without an explicit `path` the format's default file name inside
/// `export_dir` is used.
pub fn handle_export(
    store: &AnnotationStore,
    registry: &FormatRegistry,
    format_id: &str,
    path: Option<PathBuf>,
    export_dir: &Path,
    output: &mut OutputLog,
) -> Reply {
    let Ok(annotations) = store.list_all() else {
        return Reply::Notice(Notice::info("No data", "No annotations to export."));
    };

    let format = match registry.require(format_id) {
        Ok(format) => format,
        Err(e) => {
            let known = registry.ids().join(", ");
            return Reply::Notice(Notice::error(
                "Export Failed",
                format!("{} (available: {})", e, known),
            ));
        }
    };

    let path = path.unwrap_or_else(|| export_dir.join(format.default_filename()));

    match format.export(annotations, &path, &ExportOptions::default()) {
        Ok(result) => {
            if result.has_warnings() {
                log::warn!(
                    "{} export produced {} warnings",
                    format.display_name(),
                    result.warnings.len()
                );
                for warning in &result.warnings {
                    output.push(format!("Warning: {}", warning.message));
                }
            }
            output.push(format!(
                "Exported {} annotations to {}",
                result.annotations_exported,
                path.display()
            ));
            Reply::Notice(Notice::info(
                "Exported",
                format!("Annotations exported to {}", path.display()),
            ))
        }
        Err(e) => {
            log::error!("{} export to {:?} failed: {}", format.display_name(), path, e);
            Reply::Notice(Notice::error("Export Failed", e.to_string()))
        }
    }
}

/// Append annotations read from a previous export.
///
/// The format is chosen from the file extension.
pub fn handle_import(
    store: &mut AnnotationStore,
    registry: &FormatRegistry,
    path: &Path,
    output: &mut OutputLog,
) -> Reply {
    let result = registry
        .for_path(path)
        .ok_or_else(|| {
            FormatError::invalid_format(format!(
                "cannot tell the format of {} from its extension",
                path.display()
            ))
        })
        .and_then(|format| format.import(path));

    match result {
        Ok(annotations) => {
            let read = annotations.len();
            let added = store.extend(annotations);
            output.push(format!(
                "Imported {} of {} annotations from {}",
                added,
                read,
                path.display()
            ));
            Reply::Notice(Notice::info(
                "Imported",
                format!("Imported {} annotations from {}", added, path.display()),
            ))
        }
        Err(e) => {
            log::error!("Import from {:?} failed: {}", path, e);
            Reply::Notice(Notice::error("Import Failed", e.to_string()))
        }
    }
}

/// Upload every annotation to the configured database.
///
/// Failures are reported to the user; the session keeps running.
pub fn handle_upload(
    store: &AnnotationStore,
    config: &DatabaseConfig,
    output: &mut OutputLog,
) -> Reply {
    let Ok(annotations) = store.list_all() else {
        return Reply::Notice(Notice::warning("No Data", "No annotations found to upload."));
    };

    match db::upload(annotations, config) {
        Ok(count) => {
            output.push(format!("Upload successful! ({} rows)", count));
            Reply::Notice(Notice::info(
                "Success",
                format!(
                    "{} annotations uploaded to table '{}' in {}.",
                    count,
                    config.table,
                    config.path.display()
                ),
            ))
        }
        Err(e) => {
            log::error!("Upload failed ({:?}): {}", e.kind(), e);
            output.push(format!("Upload failed: {}", e));
            Reply::Notice(Notice::error(
                "Upload Failed",
                format!("Database upload failed:\n{}", e),
            ))
        }
    }
}

/// Read back the rows earlier uploads stored in the configured table.
///
/// A database file that does not exist yet is reported, not created.
pub fn handle_db(config: &DatabaseConfig) -> Reply {
    if !config.path.exists() {
        return Reply::Notice(Notice::info(
            "No database",
            format!("Nothing has been uploaded to {} yet.", config.path.display()),
        ));
    }

    let result = db::Database::open(config).and_then(|db| {
        let count = db.count_rows()?;
        let rows = db.rows()?;
        Ok((db.table().to_string(), count, rows))
    });

    match result {
        Ok((table, count, rows)) => Reply::Stored { table, count, rows },
        Err(e) => {
            log::error!("Reading {:?} failed: {}", config.path, e);
            Reply::Notice(Notice::error("Database Error", e.to_string()))
        }
    }
}
