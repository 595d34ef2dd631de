//! MRLabel application state and message dispatch.
//!
//! [`LabelerApp`] owns the session: the annotation store, the two-field form,
//! the output log, the export formats and the loaded configuration. Front-ends
//! feed it [`Message`]s and render the returned [`Reply`].

use crate::config::AppConfig;
use crate::format::FormatRegistry;
use crate::handlers;
use crate::message::{Message, Reply};
use crate::model::AnnotationStore;
use crate::picker::{FilePicker, NoFilePicker};
use crate::state::{FormState, OutputLog};

/// Main MRLabel application state.
pub struct LabelerApp {
    // Session data
    pub(crate) store: AnnotationStore,
    pub(crate) form: FormState,
    pub(crate) output: OutputLog,

    // Services
    pub(crate) format_registry: FormatRegistry,
    pub(crate) config: AppConfig,
    picker: Box<dyn FilePicker>,
}

impl LabelerApp {
    /// Create an application with an empty store.
    pub fn new(config: AppConfig, picker: Box<dyn FilePicker>) -> Self {
        log::info!(
            "Starting {} (export dir {:?}, database {:?})",
            config.app_name,
            config.export_dir(),
            config.database.path
        );
        Self {
            store: AnnotationStore::new(),
            form: FormState::new(),
            output: OutputLog::new(),
            format_registry: FormatRegistry::new(),
            config,
            picker,
        }
    }

    /// Default configuration and no file dialog.
    pub fn with_defaults() -> Self {
        Self::new(AppConfig::default(), Box::new(NoFilePicker))
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn output(&self) -> &OutputLog {
        &self.output
    }

    /// Output-log lines added since the previous call.
    pub fn drain_output(&mut self) -> Vec<String> {
        self.output.drain_new()
    }

    pub fn update(&mut self, message: Message) -> Reply {
        log::trace!("Message: {:?}", message);
        match message {
            // Form
            Message::SetFile(value) => handlers::handle_set_file(&mut self.form, value),
            Message::SetLabel(value) => handlers::handle_set_label(&mut self.form, value),
            Message::Browse => handlers::handle_browse(&mut self.form, self.picker.as_mut()),
            Message::Submit => {
                handlers::handle_submit(&mut self.form, &mut self.store, &mut self.output)
            }
            Message::Add { file, label } => {
                handlers::handle_add(&mut self.store, &mut self.output, &file, &label)
            }

            // Store
            Message::View => handlers::handle_view(&self.store),
            Message::Export { format, path } => handlers::handle_export(
                &self.store,
                &self.format_registry,
                &format,
                path,
                &self.config.export_dir(),
                &mut self.output,
            ),
            Message::Import { path } => handlers::handle_import(
                &mut self.store,
                &self.format_registry,
                &path,
                &mut self.output,
            ),
            Message::Upload => {
                handlers::handle_upload(&self.store, &self.config.database, &mut self.output)
            }
            Message::Db => handlers::handle_db(&self.config.database),

            // Session
            Message::Status => Reply::Text(self.status_text()),
            Message::Help => Reply::Text(self.help_text()),
            Message::Quit => {
                log::info!("Session ended with {} annotations", self.store.len());
                Reply::Quit
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::message::NoticeLevel;
    use crate::picker::QueuedFilePicker;
    use tempfile::tempdir;

    fn app_in(dir: &std::path::Path) -> LabelerApp {
        let mut config = AppConfig::new();
        config.preferences.export_folder = dir.display().to_string();
        config.database.path = dir.join("annotations.sqlite3");
        LabelerApp::new(config, Box::new(QueuedFilePicker::new(["/tmp/photo.jpg"])))
    }

    #[test]
    fn test_browse_label_submit_view_export_upload() {
        let dir = tempdir().unwrap();
        let mut app = app_in(dir.path());

        app.update(Message::Browse);
        app.update(Message::SetLabel("cat".to_string()));
        assert_eq!(app.update(Message::Submit), Reply::None);
        assert_eq!(app.drain_output(), vec!["Labeled: photo.jpg as cat"]);
        assert!(app.form().is_empty());

        app.update(Message::Add {
            file: "/tmp/clip.wav".to_string(),
            label: "bark".to_string(),
        });

        match app.update(Message::View) {
            Reply::Table(table) => {
                let files: Vec<_> = table.rows.iter().map(|r| r.file.as_str()).collect();
                assert_eq!(files, vec!["photo.jpg", "clip.wav"]);
            }
            other => panic!("expected table, got {:?}", other),
        }

        let reply = app.update(Message::Export {
            format: "csv".to_string(),
            path: None,
        });
        assert_eq!(reply.notice().unwrap().title, "Exported");
        let csv = std::fs::read_to_string(dir.path().join("annotations.csv")).unwrap();
        assert_eq!(csv, "file,label\nphoto.jpg,cat\nclip.wav,bark\n");

        let reply = app.update(Message::Export {
            format: "pdf".to_string(),
            path: None,
        });
        assert_eq!(reply.notice().unwrap().level, NoticeLevel::Info);
        let pdf = std::fs::read(dir.path().join("annotations.pdf")).unwrap();
        assert!(pdf.starts_with(b"%PDF-"));

        let reply = app.update(Message::Upload);
        assert_eq!(reply.notice().unwrap().title, "Success");
        let db = Database::open(&app.config().database).unwrap();
        assert_eq!(db.count_rows().unwrap(), 2);
    }

    #[test]
    fn test_empty_store_actions() {
        let dir = tempdir().unwrap();
        let mut app = app_in(dir.path());

        assert_eq!(app.update(Message::View).notice().unwrap().title, "No data");
        let reply = app.update(Message::Export {
            format: "csv".to_string(),
            path: None,
        });
        assert_eq!(reply.notice().unwrap().title, "No data");
        assert!(!dir.path().join("annotations.csv").exists());
        assert_eq!(app.update(Message::Upload).notice().unwrap().title, "No Data");
    }

    #[test]
    fn test_unreachable_database_inserts_nothing_and_session_continues() {
        let dir = tempdir().unwrap();
        let mut config = AppConfig::new();
        config.database.path = dir.path().join("gone").join("db.sqlite3");
        let mut app = LabelerApp::new(config, Box::new(NoFilePicker));

        app.update(Message::Add {
            file: "/tmp/a.txt".to_string(),
            label: "spam".to_string(),
        });
        let reply = app.update(Message::Upload);

        assert_eq!(reply.notice().unwrap().level, NoticeLevel::Error);
        assert!(app.output().last().unwrap().starts_with("Upload failed:"));
        assert!(!app.config().database.path.exists());
        assert_eq!(app.store().len(), 1);
        assert!(matches!(app.update(Message::View), Reply::Table(_)));
    }

    #[test]
    fn test_failed_submit_keeps_form() {
        let mut app = LabelerApp::with_defaults();
        app.update(Message::SetLabel("cat".to_string()));

        let reply = app.update(Message::Submit);
        assert_eq!(reply.notice().unwrap().title, "Missing Info");
        assert_eq!(app.form().label, "cat");
        assert!(app.store().is_empty());
    }

    #[test]
    fn test_text_replies_and_quit() {
        let mut app = LabelerApp::with_defaults();
        assert!(matches!(app.update(Message::Help), Reply::Text(_)));
        assert!(matches!(app.update(Message::Status), Reply::Text(_)));
        assert_eq!(app.update(Message::Quit), Reply::Quit);
    }
}
