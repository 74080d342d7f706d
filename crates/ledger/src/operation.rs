use core::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use graindash_core::{DomainError, DomainResult, OperationId};

/// Longest location string accepted (in characters, after trimming).
pub const MAX_LOCATION_LEN: usize = 200;

/// Decimal places kept for quantity and value.
pub const AMOUNT_SCALE: u32 = 2;

/// Largest accepted quantity in tonnes (10 digits, 2 of them decimals).
pub const MAX_QUANTITY: Decimal = dec!(99_999_999.99);

/// Largest accepted value (12 digits, 2 of them decimals).
pub const MAX_VALUE: Decimal = dec!(9_999_999_999.99);

/// Kind of grain movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationType {
    Purchase,
    Sale,
    Drying,
    Feed,
}

/// Which way an operation moves tonnage relative to the silo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowDirection {
    Inbound,
    Outbound,
}

impl FlowDirection {
    /// Apply the balance sign: inbound adds, outbound subtracts.
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            FlowDirection::Inbound => amount,
            FlowDirection::Outbound => -amount,
        }
    }
}

impl OperationType {
    pub const ALL: [OperationType; 4] = [
        OperationType::Purchase,
        OperationType::Sale,
        OperationType::Drying,
        OperationType::Feed,
    ];

    /// Wire name (`PURCHASE`, `SALE`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            OperationType::Purchase => "PURCHASE",
            OperationType::Sale => "SALE",
            OperationType::Drying => "DRYING",
            OperationType::Feed => "FEED",
        }
    }

    /// Human-readable label for tables and reports.
    pub fn label(self) -> &'static str {
        match self {
            OperationType::Purchase => "Purchase",
            OperationType::Sale => "Sale",
            OperationType::Drying => "Drying",
            OperationType::Feed => "Feed",
        }
    }

    /// Chart series colour (hex).
    pub fn color(self) -> &'static str {
        match self {
            OperationType::Purchase => "#16a34a",
            OperationType::Sale => "#2563eb",
            OperationType::Drying => "#f59e0b",
            OperationType::Feed => "#dc2626",
        }
    }

    pub fn direction(self) -> FlowDirection {
        match self {
            OperationType::Purchase => FlowDirection::Inbound,
            OperationType::Sale | OperationType::Drying | OperationType::Feed => {
                FlowDirection::Outbound
            }
        }
    }
}

impl core::fmt::Display for OperationType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PURCHASE" => Ok(OperationType::Purchase),
            "SALE" => Ok(OperationType::Sale),
            "DRYING" => Ok(OperationType::Drying),
            "FEED" => Ok(OperationType::Feed),
            _ => Err(DomainError::validation(
                "type",
                "must be one of: PURCHASE, SALE, DRYING, FEED",
            )),
        }
    }
}

/// Processing state of an operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    #[default]
    Completed,
    Pending,
    InProgress,
}

impl OperationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OperationStatus::Completed => "COMPLETED",
            OperationStatus::Pending => "PENDING",
            OperationStatus::InProgress => "IN_PROGRESS",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OperationStatus::Completed => "Completed",
            OperationStatus::Pending => "Pending",
            OperationStatus::InProgress => "In progress",
        }
    }
}

impl core::fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "COMPLETED" => Ok(OperationStatus::Completed),
            "PENDING" => Ok(OperationStatus::Pending),
            "IN_PROGRESS" => Ok(OperationStatus::InProgress),
            _ => Err(DomainError::validation(
                "status",
                "must be one of: COMPLETED, PENDING, IN_PROGRESS",
            )),
        }
    }
}

/// One inventory-affecting event.
///
/// Fields are private: a record can only be built through [`Operation::new`]
/// or [`Operation::apply_patch`], both of which validate, so every instance
/// satisfies the positivity and non-empty-location rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    id: OperationId,
    #[serde(rename = "type")]
    kind: OperationType,
    quantity: Decimal,
    value: Decimal,
    location: String,
    status: OperationStatus,
    created_at: DateTime<Utc>,
}

impl Operation {
    /// Build a validated record from a draft plus store-assigned identity.
    pub fn new(
        id: OperationId,
        draft: OperationDraft,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let location = validate_fields(draft.quantity, draft.value, &draft.location)?;
        Ok(Self {
            id,
            kind: draft.kind,
            quantity: draft.quantity,
            value: draft.value,
            location,
            status: draft.status,
            created_at,
        })
    }

    /// Merge `patch` into a copy of this record.
    ///
    /// `id` and `created_at` are carried over untouched; the merged record is
    /// validated as a whole and `self` is never modified.
    pub fn apply_patch(&self, patch: &OperationPatch) -> DomainResult<Self> {
        let quantity = patch.quantity.unwrap_or(self.quantity);
        let value = patch.value.unwrap_or(self.value);
        let location = patch.location.as_deref().unwrap_or(&self.location);
        let location = validate_fields(quantity, value, location)?;

        Ok(Self {
            id: self.id,
            kind: patch.kind.unwrap_or(self.kind),
            quantity,
            value,
            location,
            status: patch.status.unwrap_or(self.status),
            created_at: self.created_at,
        })
    }

    pub fn id(&self) -> OperationId {
        self.id
    }

    pub fn kind(&self) -> OperationType {
        self.kind
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn status(&self) -> OperationStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Quantity with the balance sign of its type applied.
    pub fn signed_quantity(&self) -> Decimal {
        self.kind.direction().signed(self.quantity)
    }
}

/// Create input: everything except the store-assigned `id`/`created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDraft {
    pub kind: OperationType,
    pub quantity: Decimal,
    pub value: Decimal,
    pub location: String,
    pub status: OperationStatus,
}

impl OperationDraft {
    pub fn new(
        kind: OperationType,
        quantity: Decimal,
        value: Decimal,
        location: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            quantity,
            value,
            location: location.into(),
            status: OperationStatus::default(),
        }
    }

    pub fn with_status(mut self, status: OperationStatus) -> Self {
        self.status = status;
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        validate_fields(self.quantity, self.value, &self.location).map(|_| ())
    }
}

/// Partial update. Carries no `id` or `created_at`: those never change after
/// creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationPatch {
    pub kind: Option<OperationType>,
    pub quantity: Option<Decimal>,
    pub value: Option<Decimal>,
    pub location: Option<String>,
    pub status: Option<OperationStatus>,
}

impl OperationPatch {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.quantity.is_none()
            && self.value.is_none()
            && self.location.is_none()
            && self.status.is_none()
    }
}

/// Returns the normalized (trimmed) location on success.
fn validate_fields(quantity: Decimal, value: Decimal, location: &str) -> DomainResult<String> {
    validate_amount("quantity", quantity, MAX_QUANTITY)?;
    validate_amount("value", value, MAX_VALUE)?;

    let location = location.trim();
    if location.is_empty() {
        return Err(DomainError::validation("location", "location cannot be empty"));
    }
    if location.chars().count() > MAX_LOCATION_LEN {
        return Err(DomainError::validation(
            "location",
            format!("location cannot exceed {MAX_LOCATION_LEN} characters"),
        ));
    }

    Ok(location.to_string())
}

/// Positive, at most `AMOUNT_SCALE` decimal places, at most `max`.
fn validate_amount(field: &str, amount: Decimal, max: Decimal) -> DomainResult<()> {
    if amount <= Decimal::ZERO {
        return Err(DomainError::validation(
            field,
            format!("{field} must be greater than zero"),
        ));
    }
    if amount.normalize().scale() > AMOUNT_SCALE {
        return Err(DomainError::validation(
            field,
            format!("{field} allows at most {AMOUNT_SCALE} decimal places"),
        ));
    }
    if amount > max {
        return Err(DomainError::validation(
            field,
            format!("{field} cannot exceed {max}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_id(raw: u64) -> OperationId {
        OperationId::new(raw).unwrap()
    }

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 14, 30, 0).unwrap()
    }

    fn purchase_draft() -> OperationDraft {
        OperationDraft::new(
            OperationType::Purchase,
            dec!(250),
            dec!(87500),
            "North Farm Co-op",
        )
    }

    #[test]
    fn new_operation_keeps_draft_fields_and_defaults_status() {
        let op = Operation::new(test_id(1), purchase_draft(), test_time()).unwrap();
        assert_eq!(op.id(), test_id(1));
        assert_eq!(op.kind(), OperationType::Purchase);
        assert_eq!(op.quantity(), dec!(250));
        assert_eq!(op.value(), dec!(87500));
        assert_eq!(op.location(), "North Farm Co-op");
        assert_eq!(op.status(), OperationStatus::Completed);
        assert_eq!(op.created_at(), test_time());
    }

    #[test]
    fn location_is_trimmed() {
        let mut draft = purchase_draft();
        draft.location = "  Dryer A  ".to_string();
        let op = Operation::new(test_id(1), draft, test_time()).unwrap();
        assert_eq!(op.location(), "Dryer A");
    }

    #[test]
    fn non_positive_quantity_is_rejected() {
        for quantity in [dec!(0), dec!(-1.5)] {
            let mut draft = purchase_draft();
            draft.quantity = quantity;
            let err = draft.validate().unwrap_err();
            assert_eq!(err.field(), Some("quantity"));
        }
    }

    #[test]
    fn non_positive_value_is_rejected() {
        let mut draft = purchase_draft();
        draft.value = dec!(0);
        let err = Operation::new(test_id(1), draft, test_time()).unwrap_err();
        assert_eq!(err.field(), Some("value"));
    }

    #[test]
    fn amounts_are_bounded_to_column_precision() {
        let mut draft = purchase_draft();
        draft.quantity = MAX_QUANTITY;
        draft.value = MAX_VALUE;
        assert!(Operation::new(test_id(1), draft.clone(), test_time()).is_ok());

        draft.quantity = MAX_QUANTITY + dec!(0.01);
        let err = Operation::new(test_id(1), draft, test_time()).unwrap_err();
        assert_eq!(err.field(), Some("quantity"));

        let mut draft = purchase_draft();
        draft.value = Decimal::MAX;
        let err = Operation::new(test_id(1), draft, test_time()).unwrap_err();
        assert_eq!(err.field(), Some("value"));
    }

    #[test]
    fn amounts_keep_at_most_two_decimal_places() {
        let mut draft = purchase_draft();
        draft.quantity = dec!(12.500);
        assert!(Operation::new(test_id(1), draft.clone(), test_time()).is_ok());

        draft.quantity = dec!(12.505);
        let err = Operation::new(test_id(1), draft, test_time()).unwrap_err();
        assert_eq!(err.field(), Some("quantity"));
    }

    #[test]
    fn blank_or_oversized_location_is_rejected() {
        let mut draft = purchase_draft();
        draft.location = "   ".to_string();
        assert_eq!(draft.validate().unwrap_err().field(), Some("location"));

        draft.location = "x".repeat(MAX_LOCATION_LEN + 1);
        assert_eq!(draft.validate().unwrap_err().field(), Some("location"));
    }

    #[test]
    fn patch_merges_supplied_fields_only() {
        let op = Operation::new(test_id(7), purchase_draft(), test_time()).unwrap();
        let patch = OperationPatch {
            quantity: Some(dec!(300)),
            status: Some(OperationStatus::Pending),
            ..OperationPatch::default()
        };

        let merged = op.apply_patch(&patch).unwrap();
        assert_eq!(merged.id(), op.id());
        assert_eq!(merged.created_at(), op.created_at());
        assert_eq!(merged.quantity(), dec!(300));
        assert_eq!(merged.status(), OperationStatus::Pending);
        assert_eq!(merged.value(), op.value());
        assert_eq!(merged.location(), op.location());
        assert_eq!(merged.kind(), op.kind());
    }

    #[test]
    fn invalid_patch_leaves_original_untouched() {
        let op = Operation::new(test_id(7), purchase_draft(), test_time()).unwrap();
        let before = op.clone();
        let patch = OperationPatch {
            value: Some(dec!(-10)),
            ..OperationPatch::default()
        };

        let err = op.apply_patch(&patch).unwrap_err();
        assert_eq!(err.field(), Some("value"));
        assert_eq!(op, before);
    }

    #[test]
    fn types_parse_case_insensitively_and_reject_unknowns() {
        assert_eq!("sale".parse::<OperationType>().unwrap(), OperationType::Sale);
        assert_eq!(" FEED ".parse::<OperationType>().unwrap(), OperationType::Feed);
        let err = "TRANSFER".parse::<OperationType>().unwrap_err();
        assert_eq!(err.field(), Some("type"));
        assert_eq!(
            "in_progress".parse::<OperationStatus>().unwrap(),
            OperationStatus::InProgress
        );
        assert!("DONE".parse::<OperationStatus>().is_err());
    }

    #[test]
    fn only_purchases_flow_inbound() {
        assert_eq!(OperationType::Purchase.direction(), FlowDirection::Inbound);
        for kind in [OperationType::Sale, OperationType::Drying, OperationType::Feed] {
            assert_eq!(kind.direction(), FlowDirection::Outbound);
        }
        assert_eq!(FlowDirection::Outbound.signed(dec!(80)), dec!(-80));
    }

    #[test]
    fn serializes_with_wire_names() {
        let op = Operation::new(test_id(3), purchase_draft(), test_time()).unwrap();
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["type"], "PURCHASE");
        assert_eq!(json["status"], "COMPLETED");
        assert_eq!(json["quantity"], "250");
        assert_eq!(json["value"], "87500");
        assert!(json["createdAt"].as_str().unwrap().starts_with("2024-05-10T14:30:00"));
    }
}
