//! Grain operation ledger.
//!
//! Owns the authoritative collection of operation records: the record types,
//! their validation rules, and the store that assigns ids and timestamps.
//! Everything else (metrics, reports, HTTP) works on snapshots read from here.

pub mod operation;
pub mod seed;
pub mod store;

pub use operation::{
    FlowDirection, Operation, OperationDraft, OperationPatch, OperationStatus, OperationType,
    AMOUNT_SCALE, MAX_LOCATION_LEN, MAX_QUANTITY, MAX_VALUE,
};
pub use store::{sort_newest_first, InMemoryLedgerStore, LedgerStore};
