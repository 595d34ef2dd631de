//! Upload of annotations into a relational table.
//!
//! The destination table is created on demand:
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS annotations (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     file VARCHAR(255),
//!     label VARCHAR(255),
//!     timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
//! )
//! ```
//!
//! A batch is inserted inside one transaction and committed once, so an upload
//! stores either every record or none of them.

mod error;

use std::path::PathBuf;
use std::time::Duration;

use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DB_FIELD_WIDTH, DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_DATABASE_PATH, DEFAULT_TABLE_NAME,
};
use crate::model::Annotation;

pub use error::{UploadError, UploadErrorKind};

/// Static connection parameters for uploads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database file
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Destination table
    #[serde(default = "default_table")]
    pub table: String,

    /// How long to wait on a locked database
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATABASE_PATH)
}

fn default_table() -> String {
    DEFAULT_TABLE_NAME.to_string()
}

fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            table: default_table(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

/// A row read back from the destination table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAnnotation {
    pub id: i64,
    pub file: String,
    pub label: String,
    /// Server-side insertion time (`YYYY-MM-DD HH:MM:SS`, UTC)
    pub timestamp: String,
}

/// Check that `name` is a plain SQL identifier.
pub fn validate_table_name(name: &str) -> Result<(), UploadError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid_start && valid_rest && name.len() <= 64 {
        Ok(())
    } else {
        Err(UploadError::InvalidTableName(name.to_string()))
    }
}

/// Open connection to the upload database.
pub struct Database {
    conn: Connection,
    table: String,
}

impl Database {
    /// Open (or create) the database described by `config`.
    pub fn open(config: &DatabaseConfig) -> Result<Self, UploadError> {
        validate_table_name(&config.table)?;

        log::info!("Connecting to database {:?}", config.path);
        let conn = Connection::open(&config.path).map_err(|source| UploadError::Connection {
            target: config.path.display().to_string(),
            source,
        })?;
        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;

        Ok(Self {
            conn,
            table: config.table.clone(),
        })
    }

    /// Open a private in-memory database.
    pub fn open_in_memory(table: &str) -> Result<Self, UploadError> {
        validate_table_name(table)?;

        let conn = Connection::open_in_memory().map_err(|source| UploadError::Connection {
            target: ":memory:".to_string(),
            source,
        })?;

        Ok(Self {
            conn,
            table: table.to_string(),
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Create the destination table if it does not exist.
    pub fn ensure_table(&self) -> Result<(), UploadError> {
        self.conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                file VARCHAR({width}),
                label VARCHAR({width}),
                timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
            table = self.table,
            width = DB_FIELD_WIDTH,
        ))?;
        Ok(())
    }

    /// Insert one row per annotation (file column = base name).
    ///
    /// Returns the number of rows inserted. On any failure the transaction is
    /// rolled back and no rows from this batch remain.
    pub fn upload(&mut self, annotations: &[Annotation]) -> Result<usize, UploadError> {
        self.ensure_table()?;

        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {} (file, label) VALUES (?1, ?2)",
                self.table
            ))?;

            for (index, ann) in annotations.iter().enumerate() {
                let file = ann.basename();
                check_width(index, "file", file)?;
                check_width(index, "label", &ann.label)?;

                log::debug!("Inserting #{}: {} -> {}", index, file, ann.label);
                stmt.execute(params![file, ann.label])
                    .map_err(|source| UploadError::Insert { index, source })?;
            }
        }
        tx.commit()?;

        log::info!(
            "Uploaded {} annotations into table '{}'",
            annotations.len(),
            self.table
        );
        Ok(annotations.len())
    }

    /// Number of rows in the destination table (0 if it does not exist yet).
    pub fn count_rows(&self) -> Result<usize, UploadError> {
        if !self.table_exists()? {
            return Ok(0);
        }
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", self.table),
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// All rows of the destination table, ordered by id.
    pub fn rows(&self) -> Result<Vec<StoredAnnotation>, UploadError> {
        if !self.table_exists()? {
            return Ok(Vec::new());
        }

        let mut stmt = self.conn.prepare(&format!(
            "SELECT id, file, label, timestamp FROM {} ORDER BY id ASC",
            self.table
        ))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(StoredAnnotation {
                    id: row.get(0)?,
                    file: row.get(1)?,
                    label: row.get(2)?,
                    timestamp: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    fn table_exists(&self) -> Result<bool, UploadError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![self.table],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

fn check_width(index: usize, field: &'static str, value: &str) -> Result<(), UploadError> {
    if value.chars().count() > DB_FIELD_WIDTH {
        return Err(UploadError::FieldTooLong {
            index,
            field,
            max: DB_FIELD_WIDTH,
        });
    }
    Ok(())
}

/// Connect using `config` and upload `annotations` in one transaction.
pub fn upload(annotations: &[Annotation], config: &DatabaseConfig) -> Result<usize, UploadError> {
    let mut db = Database::open(config)?;
    db.upload(annotations)
}
