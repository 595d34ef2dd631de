//! Inline status log shown next to the form.

/// Append-only list of status lines.
///
/// Front-ends call [`OutputLog::drain_new`] after each update to print the
/// lines added since the last call; the full history stays available.
#[derive(Debug, Clone, Default)]
pub struct OutputLog {
    lines: Vec<String>,
    shown: usize,
}

impl OutputLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        log::debug!("Output: {}", line);
        self.lines.push(line);
    }

    /// Lines added since the previous call.
    pub fn drain_new(&mut self) -> Vec<String> {
        let new = self.lines[self.shown..].to_vec();
        self.shown = self.lines.len();
        new
    }

    /// Every line ever pushed.
    pub fn history(&self) -> &[String] {
        &self.lines
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }
}
