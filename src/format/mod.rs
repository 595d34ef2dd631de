//! Annotation export/import system.
//!
//! This module provides a trait-based system for exporting the session's
//! annotations in various formats. New formats are added by implementing the
//! `AnnotationFormat` trait and registering them.
//!
//! ## Supported Formats
//!
//! - **CSV**: `file,label` table with base names
//! - **PDF**: one `"<basename> - <label>"` line per annotation
//! - **Session JSON**: native format with full paths, can be imported again
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mrlabel::format::{ExportOptions, FormatRegistry};
//!
//! let registry = FormatRegistry::new();
//! let format = registry.require("csv")?;
//! let result = format.export(store.list_all()?, path, &ExportOptions::default())?;
//! ```

mod error;
pub mod formats;
mod registry;
mod session;
mod traits;

pub use error::FormatError;
pub use registry::FormatRegistry;
pub use session::SessionData;
pub use traits::{AnnotationFormat, ExportOptions, ExportResult, FormatWarning};
