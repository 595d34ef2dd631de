//! Session status summary.

use crate::app::LabelerApp;

fn or_empty(value: &str) -> &str {
    if value.is_empty() { "(empty)" } else { value }
}

impl LabelerApp {
    /// Form contents, store size, export folder and upload target.
    pub fn status_text(&self) -> String {
        let db = &self.config.database;
        let mut out = String::new();
        out.push_str(&format!("File:        {}\n", or_empty(&self.form.file_path)));
        out.push_str(&format!("Label:       {}\n", or_empty(&self.form.label)));
        out.push_str(&format!("Annotations: {}\n", self.store.len()));
        out.push_str(&format!("Export dir:  {}\n", self.config.export_dir().display()));
        out.push_str(&format!("Database:    {} (table '{}')\n", db.path.display(), db.table));
        out.push_str(&format!("Log level:   {}\n", self.config.preferences.log_level.as_str()));
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::app::LabelerApp;
    use crate::message::Message;

    #[test]
    fn test_status_reflects_form_and_store() {
        let mut app = LabelerApp::with_defaults();
        app.update(Message::SetFile("/tmp/photo.jpg".to_string()));
        app.update(Message::Add {
            file: "/tmp/a.txt".to_string(),
            label: "x".to_string(),
        });

        let status = app.status_text();
        assert!(status.contains("File:        /tmp/photo.jpg"));
        assert!(status.contains("Label:       (empty)"));
        assert!(status.contains("Annotations: 1"));
        assert!(status.contains("table 'annotations'"));
        assert!(status.contains("Log level:   info"));
    }
}
