//! File selection for the "browse" action.

use std::path::PathBuf;

/// Source of a user-selected file path.
pub trait FilePicker {
    /// Ask the user for a file. `None` means the selection was cancelled.
    fn pick_file(&mut self) -> Option<PathBuf>;
}

/// Native open-file dialog.
#[derive(Debug, Default)]
pub struct NativeFilePicker {
    /// Directory the dialog opens in
    pub start_dir: Option<PathBuf>,
}

impl FilePicker for NativeFilePicker {
    fn pick_file(&mut self) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Choose File (Text/Image/Audio)")
            .add_filter("All Files", &["*"]);
        if let Some(dir) = &self.start_dir {
            dialog = dialog.set_directory(dir);
        }

        let picked = dialog.pick_file();
        if let Some(path) = &picked {
            if let Some(parent) = path.parent() {
                self.start_dir = Some(parent.to_path_buf());
            }
        }
        picked
    }
}

/// Picker that never returns a file, for sessions without a display.
#[derive(Debug, Default)]
pub struct NoFilePicker;

impl FilePicker for NoFilePicker {
    fn pick_file(&mut self) -> Option<PathBuf> {
        log::warn!("No file dialog available; use 'file <path>' instead");
        None
    }
}

/// Picker returning queued paths in order, used by tests and scripted runs.
#[derive(Debug, Default)]
pub struct QueuedFilePicker {
    queue: std::collections::VecDeque<PathBuf>,
}

impl QueuedFilePicker {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            queue: paths.into_iter().map(Into::into).collect(),
        }
    }
}

impl FilePicker for QueuedFilePicker {
    fn pick_file(&mut self) -> Option<PathBuf> {
        self.queue.pop_front()
    }
}
