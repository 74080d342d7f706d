use crate::error::ReportError;
use crate::render::ReportRenderer;
use crate::report::Report;

/// Pretty-printed JSON of the full report model.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn render(&self, report: &Report) -> Result<Vec<u8>, ReportError> {
        serde_json::to_vec_pretty(report).map_err(|e| ReportError::generation(e.to_string()))
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }
}
