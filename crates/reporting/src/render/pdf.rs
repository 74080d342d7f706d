use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

use crate::error::ReportError;
use crate::format;
use crate::render::ReportRenderer;
use crate::report::Report;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const LINE_HEIGHT_MM: f32 = 6.0;

const TITLE_FONT_SIZE: f32 = 16.0;
const HEADER_FONT_SIZE: f32 = 10.0;

/// Column title and left edge (mm).
const COLUMNS: [(&str, f32); 6] = [
    ("Date", 15.0),
    ("Type", 48.0),
    ("Quantity", 70.0),
    ("Value", 95.0),
    ("Location", 125.0),
    ("Status", 178.0),
];

/// A4 portrait table report using the built-in Helvetica faces.
#[derive(Debug, Clone, Copy)]
pub struct PdfRenderer {
    pub body_font_size: f32,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self { body_font_size: 9.0 }
    }
}

fn generation(e: impl core::fmt::Display) -> ReportError {
    ReportError::generation(format!("pdf: {e}"))
}

/// Cursor over the current page; starts a new page when the bottom margin
/// is reached.
struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
    pages: usize,
}

impl PageWriter {
    fn text(&self, text: &str, size: f32, x: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
    }

    fn advance(&mut self, lines: f32) {
        self.y -= LINE_HEIGHT_MM * lines;
    }

    /// Returns true if a page break happened.
    fn ensure_room(&mut self, lines: f32) -> bool {
        if self.y - LINE_HEIGHT_MM * lines < MARGIN_MM {
            self.new_page();
            return true;
        }
        false
    }

    fn new_page(&mut self) {
        self.pages += 1;
        let (page, layer) = self.doc.add_page(
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            format!("Page {}", self.pages),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT_MM - MARGIN_MM;
    }
}

impl PdfRenderer {
    fn write_header(&self, w: &mut PageWriter, report: &Report) {
        w.text(&report.title, TITLE_FONT_SIZE, MARGIN_MM, true);
        w.advance(1.5);
        w.text(&report.period_label(), HEADER_FONT_SIZE, MARGIN_MM, false);
        w.advance(1.0);
        w.text(&report.generated_label(), HEADER_FONT_SIZE, MARGIN_MM, false);
        w.advance(2.0);
    }

    fn write_column_titles(&self, w: &mut PageWriter) {
        for (title, x) in COLUMNS {
            w.text(title, self.body_font_size, x, true);
        }
        w.advance(1.0);
    }

    fn write_rows(&self, w: &mut PageWriter, report: &Report) {
        self.write_column_titles(w);
        for row in &report.rows {
            if w.ensure_room(1.0) {
                self.write_column_titles(w);
            }
            let cells = [
                row.timestamp.as_str(),
                row.kind.as_str(),
                row.quantity.as_str(),
                row.value.as_str(),
                row.location.as_str(),
                row.status.as_str(),
            ];
            for (cell, (_, x)) in cells.iter().zip(COLUMNS) {
                w.text(cell, self.body_font_size, x, false);
            }
            w.advance(1.0);
        }
    }

    fn write_summary(&self, w: &mut PageWriter, report: &Report) {
        let summary = &report.summary;
        let lines = 5.0 + summary.by_type.len() as f32;
        w.advance(1.0);
        w.ensure_room(lines);

        w.text("Summary", HEADER_FONT_SIZE, MARGIN_MM, true);
        w.advance(1.2);
        w.text(
            &format!("Operations: {}", summary.operation_count),
            self.body_font_size,
            MARGIN_MM,
            false,
        );
        w.advance(1.0);
        w.text(
            &format!("Inventory balance: {}", format::quantity(summary.inventory_balance)),
            self.body_font_size,
            MARGIN_MM,
            false,
        );
        w.advance(1.0);
        w.text(
            &format!("Financial balance: {}", format::currency(summary.financial_balance)),
            self.body_font_size,
            MARGIN_MM,
            false,
        );
        w.advance(1.5);

        for b in &summary.by_type {
            w.text(
                &format!(
                    "{}: {} operation(s), {}, {}",
                    b.label,
                    b.count,
                    format::quantity(b.quantity),
                    format::currency(b.value)
                ),
                self.body_font_size,
                MARGIN_MM,
                false,
            );
            w.advance(1.0);
        }
    }
}

impl ReportRenderer for PdfRenderer {
    fn render(&self, report: &Report) -> Result<Vec<u8>, ReportError> {
        let (doc, page, layer) = PdfDocument::new(
            report.title.clone(),
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Page 1".to_string(),
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(generation)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(generation)?;
        let layer = doc.get_page(page).get_layer(layer);

        let mut writer = PageWriter {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT_MM - MARGIN_MM,
            pages: 1,
        };

        self.write_header(&mut writer, report);
        self.write_rows(&mut writer, report);
        self.write_summary(&mut writer, report);

        tracing::debug!(pages = writer.pages, rows = report.rows.len(), "pdf report laid out");

        let PageWriter { doc, layer, .. } = writer;
        drop(layer);
        doc.save_to_bytes().map_err(generation)
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn content_type(&self) -> &'static str {
        "application/pdf"
    }
}
