use chrono::{DateTime, Utc};
use serde::Serialize;

use graindash_ledger::Operation;

use crate::format;
use crate::range::ReportRange;
use crate::summary::ReportSummary;

/// One table row, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub id: u64,
    pub timestamp: String,
    pub kind: String,
    pub quantity: String,
    pub value: String,
    pub location: String,
    pub status: String,
}

impl ReportRow {
    pub fn from_operation(op: &Operation) -> Self {
        Self {
            id: op.id().get(),
            timestamp: format::timestamp(op.created_at()),
            kind: op.kind().label().to_string(),
            quantity: format::quantity(op.quantity()),
            value: format::currency(op.value()),
            location: format::truncate(op.location(), format::LOCATION_DISPLAY_WIDTH),
            status: op.status().label().to_string(),
        }
    }
}

/// Renderer-independent report document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub title: String,
    pub range: ReportRange,
    pub generated_at: DateTime<Utc>,
    pub rows: Vec<ReportRow>,
    pub summary: ReportSummary,
}

impl Report {
    /// Rows keep the order of `ops` (the store hands them out newest first).
    pub fn build(
        title: impl Into<String>,
        range: ReportRange,
        generated_at: DateTime<Utc>,
        ops: &[Operation],
    ) -> Self {
        Self {
            title: title.into(),
            range,
            generated_at,
            rows: ops.iter().map(ReportRow::from_operation).collect(),
            summary: ReportSummary::from_operations(ops),
        }
    }

    /// Header line describing the covered period.
    pub fn period_label(&self) -> String {
        format!("Period: {} to {}", self.range.start(), self.range.end())
    }

    pub fn generated_label(&self) -> String {
        format!("Generated: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"))
    }
}
