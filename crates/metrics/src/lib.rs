//! Dashboard metrics derived from a ledger snapshot.
//!
//! Everything here is a pure function of the operations passed in and the
//! caller's notion of "now"; nothing is cached between calls.

pub mod dashboard;
pub mod flow;
pub mod monthly;

pub use dashboard::{compute, profit_percent, DashboardMetrics, PROFIT_WINDOW_DAYS};
pub use flow::{FlowSeries, FlowSummary};
pub use monthly::{monthly_series, MonthlyFlow, DEFAULT_MONTHS, MAX_MONTHS};
