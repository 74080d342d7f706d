//! Demo data for a fresh dashboard.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use graindash_core::DomainResult;

use crate::operation::{Operation, OperationDraft, OperationStatus, OperationType};
use crate::store::LedgerStore;

/// The five demo operations, in insertion order.
pub fn demo_drafts() -> Vec<OperationDraft> {
    vec![
        OperationDraft::new(
            OperationType::Purchase,
            Decimal::from(250),
            Decimal::from(87_500),
            "North Farm Co-op",
        ),
        OperationDraft::new(
            OperationType::Sale,
            Decimal::from(180),
            Decimal::from(72_000),
            "Central Grain Terminal",
        ),
        OperationDraft::new(
            OperationType::Drying,
            Decimal::from(120),
            Decimal::from(3_600),
            "On-site Dryer A",
        )
        .with_status(OperationStatus::InProgress),
        OperationDraft::new(
            OperationType::Feed,
            Decimal::from(80),
            Decimal::from(24_000),
            "Riverside Feedlot",
        ),
        OperationDraft::new(
            OperationType::Purchase,
            Decimal::from(300),
            Decimal::from(105_000),
            "Valley Farms",
        ),
    ]
}

/// How long before seeding each demo operation happened, in hours.
pub const DEMO_AGES_HOURS: [i64; 5] = [2, 5, 8, 10, 24];

/// Insert the demo operations, stamped at `DEMO_AGES_HOURS` before `now`.
///
/// Ids 1..=5 are assigned in order, so id 1 is the newest record.
pub fn seed_demo<S>(store: &S, now: DateTime<Utc>) -> DomainResult<Vec<Operation>>
where
    S: LedgerStore + ?Sized,
{
    let created = demo_drafts()
        .into_iter()
        .zip(DEMO_AGES_HOURS)
        .map(|(draft, hours)| store.create_at(draft, now - Duration::hours(hours)))
        .collect::<DomainResult<Vec<_>>>()?;

    tracing::info!(count = created.len(), "seeded demo operations");
    Ok(created)
}
