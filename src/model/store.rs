//! In-memory annotation store for the current session.
//!
//! The store is an ordered, append-only list. Records are never edited or
//! removed individually; the list lives as long as the owning application.

use thiserror::Error;

use super::annotation::Annotation;

/// Errors returned by store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A required field was empty
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the missing field
        field: &'static str,
    },

    /// The store holds no annotations
    #[error("No annotations available")]
    Empty,
}

/// One row of the tabular view: base name and label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub file: String,
    pub label: String,
}

/// Tabular rendering of the store, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationTable {
    pub headers: [&'static str; 2],
    pub rows: Vec<TableRow>,
}

impl AnnotationTable {
    /// Column headers used by the table view.
    pub const HEADERS: [&'static str; 2] = ["File", "Label"];
}

/// Ordered collection of annotations.
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    annotations: Vec<Annotation>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append an annotation.
    ///
    /// Values are stored as given. If either is empty the store is left untouched.
    pub fn add(&mut self, file: &str, label: &str) -> Result<&Annotation, StoreError> {
        if file.is_empty() {
            return Err(StoreError::MissingField { field: "file" });
        }
        if label.is_empty() {
            return Err(StoreError::MissingField { field: "label" });
        }

        self.annotations.push(Annotation::new(file, label));
        log::debug!("Stored annotation #{}: {} -> {}", self.len(), file, label);

        // Just pushed, so the list is non-empty
        Ok(&self.annotations[self.annotations.len() - 1])
    }

    /// All annotations in insertion order, or [`StoreError::Empty`].
    pub fn list_all(&self) -> Result<&[Annotation], StoreError> {
        if self.annotations.is_empty() {
            Err(StoreError::Empty)
        } else {
            Ok(&self.annotations)
        }
    }

    /// Build the `File` / `Label` table shown by the view command.
    pub fn table(&self) -> Result<AnnotationTable, StoreError> {
        let rows = self
            .list_all()?
            .iter()
            .map(|ann| TableRow {
                file: ann.basename().to_string(),
                label: ann.label.clone(),
            })
            .collect();

        Ok(AnnotationTable {
            headers: AnnotationTable::HEADERS,
            rows,
        })
    }

    /// Append already-validated annotations (e.g. from an import).
    ///
    /// Records with an empty field are skipped. Returns the number appended.
    pub fn extend<I>(&mut self, annotations: I) -> usize
    where
        I: IntoIterator<Item = Annotation>,
    {
        let before = self.len();
        for ann in annotations {
            if self.add(&ann.file, &ann.label).is_err() {
                log::warn!("Skipping incomplete annotation {:?}", ann);
            }
        }
        self.len() - before
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut store = AnnotationStore::new();
        store.add("/tmp/photo.jpg", "cat").unwrap();
        store.add("/tmp/clip.wav", "bark").unwrap();

        let all = store.list_all().unwrap();
        assert_eq!(
            all,
            &[
                Annotation::new("/tmp/photo.jpg", "cat"),
                Annotation::new("/tmp/clip.wav", "bark"),
            ]
        );
    }

    #[test]
    fn test_missing_fields_do_not_mutate() {
        let mut store = AnnotationStore::new();
        store.add("/tmp/a.txt", "keep").unwrap();

        assert_eq!(
            store.add("", "label"),
            Err(StoreError::MissingField { field: "file" })
        );
        assert_eq!(
            store.add("/tmp/b.txt", ""),
            Err(StoreError::MissingField { field: "label" })
        );
        assert_eq!(store.add("", ""), Err(StoreError::MissingField { field: "file" }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_duplicates_are_allowed() {
        let mut store = AnnotationStore::new();
        for _ in 0..3 {
            store.add("/tmp/same.png", "same").unwrap();
        }
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_fields_are_stored_verbatim() {
        let mut store = AnnotationStore::new();
        let ann = store.add("  /tmp/b.txt ", "  x  ").unwrap();
        assert_eq!(ann, &Annotation::new("  /tmp/b.txt ", "  x  "));

        store.add("/tmp/a.txt", "   ").unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_empty_store_signals_no_data() {
        let store = AnnotationStore::new();
        assert_eq!(store.list_all(), Err(StoreError::Empty));
        assert_eq!(store.table(), Err(StoreError::Empty));
    }

    #[test]
    fn test_table_uses_basenames() {
        let mut store = AnnotationStore::new();
        store.add("/home/user/reviews/r1.txt", "positive").unwrap();
        store.add("/home/user/audio/a1.mp3", "neutral").unwrap();

        let table = store.table().unwrap();
        assert_eq!(table.headers, ["File", "Label"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].file, "r1.txt");
        assert_eq!(table.rows[1].file, "a1.mp3");
        assert_eq!(table.rows[1].label, "neutral");
    }

    #[test]
    fn test_extend_skips_incomplete_records() {
        let mut store = AnnotationStore::new();
        let added = store.extend(vec![
            Annotation::new("a.jpg", "x"),
            Annotation::new("", "y"),
            Annotation::new("c.jpg", "z"),
        ]);
        assert_eq!(added, 2);
        assert_eq!(store.len(), 2);
    }
}
