//! MRLabel - Multimodal Review Dataset Labeler
//!
//! Attach a free-text label to a file (text, image or audio), keep the
//! labels for the session, view them as a table, export them to CSV, PDF or
//! a JSON session file, and upload them to a database table.

pub mod app;
pub mod config;
pub mod constants;
pub mod db;
pub mod format;
pub mod handlers;
pub mod message;
pub mod model;
pub mod picker;
pub mod state;
pub mod ui;

pub use app::LabelerApp;
pub use message::{Message, Notice, NoticeLevel, Reply};
