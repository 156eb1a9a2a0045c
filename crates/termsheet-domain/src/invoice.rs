//! Invoice headers, line items, and the read models built from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::Entity;

/// Storage-assigned invoice identifier.
pub type InvoiceId = i64;

/// Storage-assigned line item identifier.
pub type ItemId = i64;

/// A single billed line: what, how many, and at what unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: f64,
    pub unit_cost: f64,
}

impl LineItem {
    pub fn new(name: impl Into<String>, quantity: f64, unit_cost: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_cost,
        }
    }

    pub fn line_total(&self) -> f64 {
        self.quantity * self.unit_cost
    }
}

/// A line item as persisted, carrying its row id and owning invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredLineItem {
    pub id: ItemId,
    pub invoice_id: InvoiceId,
    pub item: LineItem,
}

/// Persisted invoice header. `date_created` is assigned once, on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub provider_id: String,
    pub client_id: String,
    pub paid: bool,
    pub date_created: DateTime<Utc>,
}

/// Row shown in the invoice list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceSummary {
    pub id: InvoiceId,
    pub provider_name: String,
    pub client_name: String,
    pub date_created: DateTime<Utc>,
    pub paid: bool,
}

impl InvoiceSummary {
    pub fn status_label(&self) -> &'static str {
        status_label(self.paid)
    }
}

/// Complete invoice with both parties resolved, used by the detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceData {
    pub invoice: Invoice,
    pub provider: Entity,
    pub client: Entity,
    pub items: Vec<StoredLineItem>,
}

impl InvoiceData {
    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .map(|stored| stored.item.line_total())
            .fold(0.0, |acc, total| acc + total)
    }

    pub fn status_label(&self) -> &'static str {
        status_label(self.invoice.paid)
    }
}

fn status_label(paid: bool) -> &'static str {
    if paid {
        "Paid"
    } else {
        "Unpaid"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_total_multiplies_quantity_and_cost() {
        let item = LineItem::new("Widget", 10.0, 25.5);
        assert!((item.line_total() - 255.0).abs() < 1e-9);
    }

    #[test]
    fn invoice_without_items_totals_positive_zero() {
        let party = |id: &str| Entity {
            id: id.into(),
            name: id.into(),
            address: None,
            email: None,
            phone: None,
        };
        let data = InvoiceData {
            invoice: Invoice {
                id: 1,
                provider_id: "p".into(),
                client_id: "c".into(),
                paid: false,
                date_created: Utc::now(),
            },
            provider: party("p"),
            client: party("c"),
            items: Vec::new(),
        };
        assert_eq!(format!("{:.2}", data.total()), "0.00");
    }

    #[test]
    fn invoice_summary_serializes_status_fields() {
        let summary = InvoiceSummary {
            id: 7,
            provider_name: "Acme".into(),
            client_name: "Globex".into(),
            date_created: DateTime::parse_from_rfc3339("2024-03-01T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            paid: true,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["paid"], true);
        assert_eq!(summary.status_label(), "Paid");
    }
}
