//! Form state: the pending file path and label before submit.

/// Values of the two input fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    /// Path of the file to annotate
    pub file_path: String,
    /// Label to attach
    pub label: String,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset both fields after a successful submit.
    pub fn clear(&mut self) {
        self.file_path.clear();
        self.label.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.file_path.is_empty() && self.label.is_empty()
    }
}
