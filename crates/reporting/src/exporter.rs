use chrono::{DateTime, Utc};

use graindash_ledger::LedgerStore;

use crate::error::ReportError;
use crate::range::ReportRange;
use crate::render::ReportRenderer;
use crate::report::Report;

pub const DEFAULT_REPORT_TITLE: &str = "Grain Operations Report";

/// A fully rendered, downloadable document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Result of an export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// No operation falls inside the range; nothing was produced.
    NoData,
    Ready(ReportArtifact),
}

/// Pulls a date-ranged snapshot from the ledger and renders it.
#[derive(Debug, Clone)]
pub struct ReportExporter {
    title: String,
}

impl Default for ReportExporter {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_TITLE)
    }
}

impl ReportExporter {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Filter, summarise and render. The artifact only exists if the renderer
    /// finished successfully.
    pub fn export<S>(
        &self,
        store: &S,
        range: &ReportRange,
        renderer: &dyn ReportRenderer,
        now: DateTime<Utc>,
    ) -> Result<ExportOutcome, ReportError>
    where
        S: LedgerStore + ?Sized,
    {
        let ops = store.list_by_date_range(range.start_at(), range.end_at());
        if ops.is_empty() {
            tracing::info!(
                start = %range.start(),
                end = %range.end(),
                "report range has no operations"
            );
            return Ok(ExportOutcome::NoData);
        }

        let report = Report::build(self.title.clone(), *range, now, &ops);
        let bytes = renderer.render(&report).inspect_err(|e| {
            tracing::warn!(error = %e, format = renderer.extension(), "report rendering failed");
        })?;

        let artifact = ReportArtifact {
            file_name: range.file_name(renderer.extension()),
            content_type: renderer.content_type(),
            bytes,
        };
        tracing::info!(
            file_name = %artifact.file_name,
            operations = report.summary.operation_count,
            bytes = artifact.bytes.len(),
            "report exported"
        );
        Ok(ExportOutcome::Ready(artifact))
    }
}
