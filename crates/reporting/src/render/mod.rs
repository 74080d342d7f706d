//! Document encoders.
//!
//! A renderer turns a finished [`Report`] into bytes in memory. Nothing is
//! written anywhere until the whole document has been produced, so a failed
//! render never leaves a partial artifact behind.

use core::str::FromStr;

use crate::error::ReportError;
use crate::report::Report;

pub mod json;
pub mod pdf;

pub use json::JsonRenderer;
pub use pdf::PdfRenderer;

pub trait ReportRenderer: Send + Sync {
    fn render(&self, report: &Report) -> Result<Vec<u8>, ReportError>;

    /// File extension without the dot.
    fn extension(&self) -> &'static str;

    fn content_type(&self) -> &'static str;
}

/// Output formats selectable by callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Pdf,
    Json,
}

impl ReportFormat {
    pub fn renderer(self) -> Box<dyn ReportRenderer> {
        match self {
            ReportFormat::Pdf => Box::new(PdfRenderer::default()),
            ReportFormat::Json => Box::new(JsonRenderer),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(ReportFormat::Pdf),
            "json" => Ok(ReportFormat::Json),
            other => Err(ReportError::validation(format!(
                "unsupported report format `{other}` (expected pdf or json)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_parse_and_pick_matching_renderer() {
        let pdf: ReportFormat = "PDF".parse().unwrap();
        assert_eq!(pdf.renderer().extension(), "pdf");
        assert_eq!(pdf.renderer().content_type(), "application/pdf");

        let json: ReportFormat = "json".parse().unwrap();
        assert_eq!(json.renderer().extension(), "json");

        assert!(matches!("xlsx".parse::<ReportFormat>(), Err(ReportError::Validation(_))));
    }
}
