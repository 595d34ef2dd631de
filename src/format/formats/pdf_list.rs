//! PDF list format implementation.
//!
//! Renders one fixed-size text line per annotation, `"<basename> - <label>"`,
//! top to bottom on A4 pages with an automatic page break.
//!
//! Layout is computed by [`PdfLayout::build`] independently of the PDF writer,
//! so line content and positions can be inspected without parsing PDF bytes.

use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::constants::pdf::{
    BOTTOM_MARGIN_MM, CELL_PADDING_MM, DOCUMENT_TITLE, FONT_SIZE_PT, LINE_HEIGHT_MM, MARGIN_MM,
    PAGE_HEIGHT_MM, PAGE_WIDTH_MM, PT_TO_MM,
};
use crate::format::error::FormatError;
use crate::format::traits::{AnnotationFormat, ExportOptions, ExportResult, FormatWarning};
use crate::model::Annotation;

const LAYER_NAME: &str = "Annotations";

/// Number of text lines that fit between the top and bottom margins.
pub fn lines_per_page() -> usize {
    ((PAGE_HEIGHT_MM - MARGIN_MM - BOTTOM_MARGIN_MM) / LINE_HEIGHT_MM).floor() as usize
}

/// A positioned line of text. Coordinates follow PDF conventions
/// (origin at the bottom-left corner of the page).
#[derive(Debug, Clone, PartialEq)]
pub struct PdfLine {
    pub text: String,
    pub x_mm: f32,
    pub y_mm: f32,
}

/// Page-by-page line layout of an annotation list.
#[derive(Debug, Clone, Default)]
pub struct PdfLayout {
    pub pages: Vec<Vec<PdfLine>>,
}

impl PdfLayout {
    /// Lay out one line per annotation, starting a new page when full.
    ///
    /// Characters the built-in fonts cannot encode are replaced with `?` and
    /// reported as warnings.
    pub fn build(annotations: &[Annotation]) -> (Self, Vec<FormatWarning>) {
        let per_page = lines_per_page();
        let mut warnings = Vec::new();
        let mut pages: Vec<Vec<PdfLine>> = Vec::new();

        for (index, ann) in annotations.iter().enumerate() {
            let row = index % per_page;
            if row == 0 {
                pages.push(Vec::with_capacity(per_page));
            }

            let (text, replaced) = to_latin1_lossy(&ann.summary_line());
            if replaced > 0 {
                warnings.push(
                    FormatWarning::new(format!(
                        "Replaced {} unsupported character(s) in '{}'",
                        replaced,
                        ann.basename()
                    ))
                    .at(index),
                );
            }

            if let Some(page) = pages.last_mut() {
                page.push(PdfLine {
                    text,
                    x_mm: MARGIN_MM + CELL_PADDING_MM,
                    y_mm: baseline_y(row),
                });
            }
        }

        (Self { pages }, warnings)
    }

    /// All lines in reading order.
    pub fn lines(&self) -> impl Iterator<Item = &PdfLine> {
        self.pages.iter().flatten()
    }

    pub fn line_count(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }
}

/// Baseline of the `row`-th line, text vertically centred in its cell.
fn baseline_y(row: usize) -> f32 {
    let cell_top = MARGIN_MM + row as f32 * LINE_HEIGHT_MM;
    let baseline_from_top = cell_top + LINE_HEIGHT_MM / 2.0 + 0.3 * FONT_SIZE_PT * PT_TO_MM;
    PAGE_HEIGHT_MM - baseline_from_top
}

/// Replace characters outside printable Latin-1 with `?`.
fn to_latin1_lossy(text: &str) -> (String, usize) {
    let mut replaced = 0;
    let sanitized = text
        .chars()
        .map(|c| {
            if (c as u32) < 0x100 && !c.is_control() {
                c
            } else {
                replaced += 1;
                '?'
            }
        })
        .collect();
    (sanitized, replaced)
}

/// PDF list format.
///
/// Supports:
/// - Multi-page output
///
/// Does not support:
/// - Import
/// - Characters outside Latin-1 (replaced with `?`)
pub struct PdfFormat;

impl AnnotationFormat for PdfFormat {
    fn id(&self) -> &'static str {
        "pdf"
    }

    fn display_name(&self) -> &'static str {
        "PDF list"
    }

    fn extensions(&self) -> &[&'static str] {
        &["pdf"]
    }

    fn default_filename(&self) -> &'static str {
        "annotations.pdf"
    }

    fn export_to_bytes(
        &self,
        annotations: &[Annotation],
        _options: &ExportOptions,
    ) -> Result<(Vec<u8>, ExportResult), FormatError> {
        let (layout, warnings) = PdfLayout::build(annotations);

        let (doc, first_page, first_layer) = PdfDocument::new(
            DOCUMENT_TITLE,
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            LAYER_NAME,
        );
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(FormatError::pdf)?;

        for (page_index, lines) in layout.pages.iter().enumerate() {
            let (page, layer) = if page_index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME)
            };
            let current_layer = doc.get_page(page).get_layer(layer);

            for line in lines {
                current_layer.use_text(
                    line.text.clone(),
                    FONT_SIZE_PT,
                    Mm(line.x_mm),
                    Mm(line.y_mm),
                    &font,
                );
            }
        }

        log::debug!(
            "Rendered {} lines on {} PDF pages",
            layout.line_count(),
            layout.pages.len()
        );

        let bytes = doc.save_to_bytes().map_err(FormatError::pdf)?;

        let mut result = ExportResult::with_count(annotations.len());
        for warning in warnings {
            log::warn!("{}", warning.message);
            result.add_warning(warning);
        }

        Ok((bytes, result))
    }
}
