//! Global constants for the MRLabel application

/// Application name shown in the banner and stored in config files
pub const APP_NAME: &str = "MRLabel";

/// Long application title
pub const APP_TITLE: &str = "Multimodal Review Dataset Labeler";

/// Default database file (relative to the working directory)
pub const DEFAULT_DATABASE_PATH: &str = "annotation_db.sqlite3";

/// Default destination table for uploads
pub const DEFAULT_TABLE_NAME: &str = "annotations";

/// Default SQLite busy timeout in milliseconds
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Column width used for the `file` and `label` columns of the upload table
pub const DB_FIELD_WIDTH: usize = 255;

/// PDF page geometry (A4, millimetres)
pub mod pdf {
    /// Page width
    pub const PAGE_WIDTH_MM: f32 = 210.0;
    /// Page height
    pub const PAGE_HEIGHT_MM: f32 = 297.0;
    /// Left and top margin
    pub const MARGIN_MM: f32 = 10.0;
    /// Bottom margin that triggers a page break
    pub const BOTTOM_MARGIN_MM: f32 = 20.0;
    /// Height of one text line
    pub const LINE_HEIGHT_MM: f32 = 10.0;
    /// Horizontal padding inside a text cell
    pub const CELL_PADDING_MM: f32 = 1.0;
    /// Font size in points
    pub const FONT_SIZE_PT: f32 = 12.0;
    /// Points to millimetres
    pub const PT_TO_MM: f32 = 25.4 / 72.0;
    /// Document title written to the PDF info dictionary
    pub const DOCUMENT_TITLE: &str = "Annotations";
}
