use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use graindash_ledger::{Operation, OperationType};

pub const DEFAULT_MONTHS: u32 = 6;
pub const MAX_MONTHS: u32 = 24;

/// Purchased and sold tonnage for one calendar month (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyFlow {
    /// `YYYY-MM`.
    pub month: String,
    /// Short month name, e.g. `Jun`.
    pub label: String,
    pub purchase: Decimal,
    pub sale: Decimal,
}

/// One entry per calendar month, oldest first, ending with the month of `now`.
///
/// Months without operations are present with zero totals. Drying and feed
/// are not part of this series.
pub fn monthly_series(ops: &[Operation], now: DateTime<Utc>, months: u32) -> Vec<MonthlyFlow> {
    let current = month_index(now.year(), now.month());
    let Some(this_month) = NaiveDate::from_ymd_opt(now.year(), now.month(), 1) else {
        return Vec::new();
    };

    let mut series: Vec<MonthlyFlow> = (0..months)
        .rev()
        .filter_map(|back| this_month.checked_sub_months(Months::new(back)))
        .map(|first| MonthlyFlow {
            month: first.format("%Y-%m").to_string(),
            label: first.format("%b").to_string(),
            purchase: Decimal::ZERO,
            sale: Decimal::ZERO,
        })
        .collect();

    for op in ops {
        let at = op.created_at();
        let back = current - month_index(at.year(), at.month());
        if back < 0 || back >= series.len() as i64 {
            continue;
        }
        let len = series.len();
        let entry = &mut series[len - 1 - back as usize];
        match op.kind() {
            OperationType::Purchase => entry.purchase += op.quantity(),
            OperationType::Sale => entry.sale += op.quantity(),
            OperationType::Drying | OperationType::Feed => {}
        }
    }

    series
}

fn month_index(year: i32, month: u32) -> i64 {
    i64::from(year) * 12 + i64::from(month) - 1
}
