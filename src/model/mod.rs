//! Data models for MRLabel.

mod annotation;
mod store;

pub use annotation::Annotation;
pub use store::{AnnotationStore, AnnotationTable, StoreError, TableRow};
