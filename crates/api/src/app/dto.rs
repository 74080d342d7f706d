use core::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use graindash_core::DomainError;
use graindash_ledger::{OperationDraft, OperationPatch, OperationStatus, OperationType};
use graindash_reporting::{ReportFormat, ReportRange};

// -------------------------
// Request DTOs
// -------------------------

/// Every field is optional at the wire level so missing values surface as
/// field-level validation errors instead of generic body rejections.
/// Unknown fields (`id`, `createdAt`, ...) are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct CreateOperationRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Decimal string or JSON number; parsed in `into_*` so a malformed
    /// amount is reported against its field.
    pub quantity: Option<Value>,
    pub value: Option<Value>,
    pub location: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateOperationRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub quantity: Option<Value>,
    pub value: Option<Value>,
    pub location: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListOperationsQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MonthlyFlowQuery {
    pub months: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportReportQuery {
    pub start: Option<String>,
    pub end: Option<String>,
    pub format: Option<String>,
}

// -------------------------
// Mapping helpers
// -------------------------

fn required<T>(field: &str, value: Option<T>) -> Result<T, DomainError> {
    value.ok_or_else(|| DomainError::validation(field, format!("{field} is required")))
}

fn parse_amount(field: &str, raw: Option<Value>) -> Result<Option<Decimal>, DomainError> {
    let invalid = || DomainError::validation(field, format!("{field} must be a decimal number"));
    let text = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(_) => return Err(invalid()),
    };
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map(Some)
        .map_err(|_| invalid())
}

fn parse_status(raw: Option<String>) -> Result<Option<OperationStatus>, DomainError> {
    raw.map(|s| s.parse()).transpose()
}

fn parse_kind(raw: Option<String>) -> Result<Option<OperationType>, DomainError> {
    raw.map(|s| s.parse()).transpose()
}

impl CreateOperationRequest {
    pub fn into_draft(self) -> Result<OperationDraft, DomainError> {
        let kind = required("type", parse_kind(self.kind)?)?;
        let quantity = required("quantity", parse_amount("quantity", self.quantity)?)?;
        let value = required("value", parse_amount("value", self.value)?)?;
        let location = required("location", self.location)?;
        let status = parse_status(self.status)?.unwrap_or_default();

        let draft = OperationDraft::new(kind, quantity, value, location).with_status(status);
        draft.validate()?;
        Ok(draft)
    }
}

impl UpdateOperationRequest {
    pub fn into_patch(self) -> Result<OperationPatch, DomainError> {
        Ok(OperationPatch {
            kind: parse_kind(self.kind)?,
            quantity: parse_amount("quantity", self.quantity)?,
            value: parse_amount("value", self.value)?,
            location: self.location,
            status: parse_status(self.status)?,
        })
    }
}

/// Validated form of [`ListOperationsQuery`].
#[derive(Debug, Default)]
pub struct OperationFilter {
    pub kind: Option<OperationType>,
    pub range: Option<ReportRange>,
    pub limit: Option<usize>,
}

impl ListOperationsQuery {
    pub fn into_filter(self) -> Result<OperationFilter, DomainError> {
        let range = match (self.start, self.end) {
            (None, None) => None,
            (Some(start), Some(end)) => Some(
                ReportRange::parse(&start, &end)
                    .map_err(|e| DomainError::validation("start", e.to_string()))?,
            ),
            (Some(_), None) => {
                return Err(DomainError::validation("end", "end is required when start is given"));
            }
            (None, Some(_)) => {
                return Err(DomainError::validation("start", "start is required when end is given"));
            }
        };

        Ok(OperationFilter {
            kind: parse_kind(self.kind)?,
            range,
            limit: self.limit,
        })
    }
}

impl MonthlyFlowQuery {
    pub fn into_months(self) -> Result<u32, DomainError> {
        let months = self.months.unwrap_or(graindash_metrics::DEFAULT_MONTHS);
        if months == 0 || months > graindash_metrics::MAX_MONTHS {
            return Err(DomainError::validation(
                "months",
                format!("months must be between 1 and {}", graindash_metrics::MAX_MONTHS),
            ));
        }
        Ok(months)
    }
}

impl ExportReportQuery {
    pub fn into_request(self) -> Result<(ReportRange, ReportFormat), graindash_reporting::ReportError> {
        use graindash_reporting::ReportError;

        let start = self
            .start
            .ok_or_else(|| ReportError::validation("start date is required"))?;
        let end = self
            .end
            .ok_or_else(|| ReportError::validation("end date is required"))?;
        let range = ReportRange::parse(&start, &end)?;
        let format = match self.format {
            Some(raw) => raw.parse()?,
            None => ReportFormat::default(),
        };
        Ok((range, format))
    }
}
