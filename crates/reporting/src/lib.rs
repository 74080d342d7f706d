//! Date-ranged operation reports.
//!
//! - `range.rs`: inclusive calendar-day range and artifact naming
//! - `summary.rs`: one-pass totals over the filtered operations
//! - `report.rs`: the display-ready document model
//! - `render/`: document encoders (PDF, JSON)
//! - `exporter.rs`: ties the store, the model and a renderer together

pub mod error;
pub mod exporter;
pub mod format;
pub mod range;
pub mod render;
pub mod report;
pub mod summary;

pub use error::ReportError;
pub use exporter::{ExportOutcome, ReportArtifact, ReportExporter, DEFAULT_REPORT_TITLE};
pub use range::ReportRange;
pub use render::{JsonRenderer, PdfRenderer, ReportFormat, ReportRenderer};
pub use report::{Report, ReportRow};
pub use summary::{ReportSummary, TypeBreakdown};
