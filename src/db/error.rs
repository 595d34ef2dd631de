//! Error types for database uploads.

use thiserror::Error;

/// Coarse classification of an upload failure, for user messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadErrorKind {
    /// The database could not be opened or reached
    Connection,
    /// A statement failed
    Sql,
    /// The configuration is unusable (e.g. bad table name)
    Config,
    /// A record cannot be stored as-is
    Data,
}

/// Errors that can occur while uploading annotations.
#[derive(Error, Debug)]
pub enum UploadError {
    /// Opening the database failed
    #[error("Cannot connect to database '{target}': {source}")]
    Connection {
        /// Database path or address
        target: String,
        #[source]
        source: rusqlite::Error,
    },

    /// Any other SQL failure (schema creation, commit, queries)
    #[error("SQL error: {0}")]
    Sql(#[from] rusqlite::Error),

    /// Inserting a specific record failed; the batch was rolled back
    #[error("Insert of annotation #{index} failed: {source}")]
    Insert {
        /// Zero-based position in the uploaded batch
        index: usize,
        #[source]
        source: rusqlite::Error,
    },

    /// A field is wider than the destination column
    #[error("Annotation #{index}: {field} is longer than {max} characters")]
    FieldTooLong {
        /// Zero-based position in the uploaded batch
        index: usize,
        /// Column name
        field: &'static str,
        /// Column width
        max: usize,
    },

    /// Table names are interpolated into SQL and must be plain identifiers
    #[error("Invalid table name '{0}'")]
    InvalidTableName(String),
}

impl UploadError {
    /// Classify this error.
    pub fn kind(&self) -> UploadErrorKind {
        match self {
            UploadError::Connection { .. } => UploadErrorKind::Connection,
            UploadError::Sql(_) | UploadError::Insert { .. } => UploadErrorKind::Sql,
            UploadError::FieldTooLong { .. } => UploadErrorKind::Data,
            UploadError::InvalidTableName(_) => UploadErrorKind::Config,
        }
    }
}
