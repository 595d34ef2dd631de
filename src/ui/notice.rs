//! Notice rendering.

use crate::message::{Notice, NoticeLevel};

/// Render a notice as `[level] Title: message`.
///
/// Continuation lines of a multi-line message are indented.
pub fn render_notice(notice: &Notice) -> String {
    let level = match notice.level {
        NoticeLevel::Info => "info",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Error => "error",
    };
    let message = notice.message.replace('\n', "\n    ");
    format!("[{}] {}: {}", level, notice.title, message)
}
