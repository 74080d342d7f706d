use rust_decimal::Decimal;
use serde::Serialize;

use graindash_ledger::{Operation, OperationType};

/// Per-type tonnage totals plus the signed balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowSummary {
    pub purchase: Decimal,
    pub sale: Decimal,
    pub drying: Decimal,
    pub feed: Decimal,
    /// `purchase - (sale + drying + feed)`.
    pub balance: Decimal,
}

/// One chart series point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowSeries {
    #[serde(rename = "type")]
    pub kind: OperationType,
    pub label: &'static str,
    pub color: &'static str,
    pub quantity: Decimal,
}

impl FlowSummary {
    pub fn from_operations<'a, I>(ops: I) -> Self
    where
        I: IntoIterator<Item = &'a Operation>,
    {
        let mut flow = Self::default();
        for op in ops {
            flow.add(op);
        }
        flow
    }

    /// Fold one operation into the totals.
    pub fn add(&mut self, op: &Operation) {
        let slot = match op.kind() {
            OperationType::Purchase => &mut self.purchase,
            OperationType::Sale => &mut self.sale,
            OperationType::Drying => &mut self.drying,
            OperationType::Feed => &mut self.feed,
        };
        *slot += op.quantity();
        self.balance += op.signed_quantity();
    }

    pub fn quantity_for(&self, kind: OperationType) -> Decimal {
        match kind {
            OperationType::Purchase => self.purchase,
            OperationType::Sale => self.sale,
            OperationType::Drying => self.drying,
            OperationType::Feed => self.feed,
        }
    }

    pub fn outbound(&self) -> Decimal {
        self.sale + self.drying + self.feed
    }

    pub fn series(&self) -> Vec<FlowSeries> {
        OperationType::ALL
            .iter()
            .map(|&kind| FlowSeries {
                kind,
                label: kind.label(),
                color: kind.color(),
                quantity: self.quantity_for(kind),
            })
            .collect()
    }
}
