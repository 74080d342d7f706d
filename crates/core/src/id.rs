//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a ledger operation.
///
/// Always positive; assigned by the store from a monotonic counter and never
/// reused, even after the record is deleted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationId(u64);

impl OperationId {
    /// Wrap a raw id. Zero is rejected.
    pub fn new(raw: u64) -> Result<Self, DomainError> {
        if raw == 0 {
            return Err(DomainError::invalid_id("OperationId: must be positive"));
        }
        Ok(Self(raw))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for OperationId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<OperationId> for u64 {
    fn from(value: OperationId) -> Self {
        value.0
    }
}

impl FromStr for OperationId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = u64::from_str(s.trim())
            .map_err(|e| DomainError::invalid_id(format!("OperationId: {e}")))?;
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_ids() {
        let id: OperationId = "42".parse().unwrap();
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn rejects_zero_and_garbage() {
        assert!(matches!("0".parse::<OperationId>(), Err(DomainError::InvalidId(_))));
        assert!(matches!("abc".parse::<OperationId>(), Err(DomainError::InvalidId(_))));
        assert!(matches!("-3".parse::<OperationId>(), Err(DomainError::InvalidId(_))));
    }
}
