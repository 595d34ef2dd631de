//! Session state: form fields and the status log.

mod form;
mod output;

pub use form::FormState;
pub use output::OutputLog;
