use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use graindash_ledger::{Operation, OperationStatus, OperationType};

use crate::flow::FlowSummary;

/// Trailing window used for `monthly_profit`.
pub const PROFIT_WINDOW_DAYS: i64 = 30;

/// Figures shown on the dashboard header and charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    /// Tonnes on hand: purchases minus sales, drying and feed.
    pub total_inventory: Decimal,
    /// Same formula as `total_inventory`; kept as its own output for the UI.
    pub operational_balance: Decimal,
    /// Sale value minus purchase value over the trailing 30 days.
    pub monthly_profit: Decimal,
    /// `monthly_profit` relative to purchase value in the same window, in
    /// percent (2 dp). Zero when there were no purchases.
    pub monthly_profit_percent: Decimal,
    pub today_operations: usize,
    pub pending_operations: usize,
    pub flow: FlowSummary,
}

/// Compute dashboard metrics in a single pass over `ops`.
///
/// "Today" is the UTC calendar day of `now`; the profit window is
/// `[now - 30 days, now]`.
pub fn compute(ops: &[Operation], now: DateTime<Utc>) -> DashboardMetrics {
    let window_start = now - Duration::days(PROFIT_WINDOW_DAYS);
    let today = now.date_naive();

    let mut flow = FlowSummary::default();
    let mut window_sales = Decimal::ZERO;
    let mut window_purchases = Decimal::ZERO;
    let mut today_operations = 0;
    let mut pending_operations = 0;

    for op in ops {
        flow.add(op);

        let created_at = op.created_at();
        if created_at >= window_start && created_at <= now {
            match op.kind() {
                OperationType::Sale => window_sales += op.value(),
                OperationType::Purchase => window_purchases += op.value(),
                OperationType::Drying | OperationType::Feed => {}
            }
        }

        if created_at.date_naive() == today {
            today_operations += 1;
        }
        if op.status() == OperationStatus::Pending {
            pending_operations += 1;
        }
    }

    let monthly_profit = window_sales - window_purchases;

    DashboardMetrics {
        total_inventory: flow.balance,
        operational_balance: flow.balance,
        monthly_profit,
        monthly_profit_percent: profit_percent(monthly_profit, window_purchases),
        today_operations,
        pending_operations,
        flow,
    }
}

/// `profit / cost * 100`, rounded to 2 dp. A zero cost (or an overflow) maps
/// to zero instead of an error.
pub fn profit_percent(profit: Decimal, cost: Decimal) -> Decimal {
    if cost.is_zero() {
        return Decimal::ZERO;
    }
    profit
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(cost))
        .map(|pct| pct.round_dp(2))
        .unwrap_or(Decimal::ZERO)
}
