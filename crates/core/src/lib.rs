//! Domain primitives shared by the ledger, metrics and reporting crates.

pub mod clock;
pub mod error;
pub mod id;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{DomainError, DomainResult};
pub use id::OperationId;
