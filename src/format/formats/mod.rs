//! Annotation format implementations.

mod csv_table;
mod pdf_list;
mod session_json;

#[cfg(test)]
mod tests;

pub use csv_table::{CSV_COLUMNS, CsvFormat};
pub use pdf_list::{PdfFormat, PdfLayout, PdfLine, lines_per_page};
pub use session_json::SessionJsonFormat;
