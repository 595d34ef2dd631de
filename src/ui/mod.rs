//! Text rendering for the MRLabel terminal front-end.
//!
//! `table` and `notice` are free renderers over plain data; `help` and
//! `status` are `impl LabelerApp` blocks that read application state.

mod help;
mod notice;
mod status;
mod table;

pub use notice::render_notice;
pub use table::{render_stored, render_table};

use crate::message::Reply;

/// Application version shown in help and status output.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Render a reply for the terminal. `None` and `Quit` render as nothing.
pub fn render_reply(reply: &Reply) -> Option<String> {
    match reply {
        Reply::None | Reply::Quit => None,
        Reply::Notice(notice) => Some(render_notice(notice)),
        Reply::Table(table) => Some(render_table(table)),
        Reply::Stored { table, count, rows } => Some(render_stored(table, *count, rows)),
        Reply::Text(text) => Some(text.clone()),
    }
}
