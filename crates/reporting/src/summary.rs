use rust_decimal::Decimal;
use serde::Serialize;

use graindash_ledger::{Operation, OperationType};
use graindash_metrics::FlowSummary;

/// Count, tonnage and value for one operation type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeBreakdown {
    #[serde(rename = "type")]
    pub kind: OperationType,
    pub label: &'static str,
    pub count: usize,
    pub quantity: Decimal,
    pub value: Decimal,
}

/// Totals for the operations inside a report range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub operation_count: usize,
    /// Tonnes: purchases minus sales, drying and feed.
    pub inventory_balance: Decimal,
    /// Cash position: purchase value is money out, every other type counts
    /// as money in (sale, drying and feed values).
    pub financial_balance: Decimal,
    /// One entry per type, in `OperationType::ALL` order.
    pub by_type: Vec<TypeBreakdown>,
    #[serde(skip)]
    pub flow: FlowSummary,
}

impl ReportSummary {
    /// Single pass over `ops`.
    pub fn from_operations(ops: &[Operation]) -> Self {
        let mut by_type: Vec<TypeBreakdown> = OperationType::ALL
            .iter()
            .map(|&kind| TypeBreakdown {
                kind,
                label: kind.label(),
                count: 0,
                quantity: Decimal::ZERO,
                value: Decimal::ZERO,
            })
            .collect();
        let mut flow = FlowSummary::default();

        for op in ops {
            flow.add(op);
            let entry = &mut by_type[type_index(op.kind())];
            entry.count += 1;
            entry.quantity += op.quantity();
            entry.value += op.value();
        }

        // Opposite sign to tonnage: inbound grain is outbound money.
        let financial_balance: Decimal = by_type
            .iter()
            .map(|b| -b.kind.direction().signed(b.value))
            .sum();

        Self {
            operation_count: ops.len(),
            inventory_balance: flow.balance,
            financial_balance,
            by_type,
            flow,
        }
    }

    pub fn breakdown(&self, kind: OperationType) -> &TypeBreakdown {
        &self.by_type[type_index(kind)]
    }
}

fn type_index(kind: OperationType) -> usize {
    match kind {
        OperationType::Purchase => 0,
        OperationType::Sale => 1,
        OperationType::Drying => 2,
        OperationType::Feed => 3,
    }
}
