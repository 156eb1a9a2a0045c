//! Read-only text views of invoices.

use colored::Colorize;
use termsheet_domain::{Entity, InvoiceData, InvoiceSummary, StoredLineItem};

use crate::utils::text::truncate_text;

const ITEM_WIDTH: usize = 20;
const ITEM_NAME_MAX: usize = 18;
const QUANTITY_WIDTH: usize = 12;
const MONEY_WIDTH: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStyle {
    pub currency_symbol: String,
    pub color: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            currency_symbol: "$".into(),
            color: false,
        }
    }
}

impl RenderStyle {
    pub fn money(&self, amount: f64) -> String {
        format!("{}{:.2}", self.currency_symbol, amount)
    }

    fn title(&self, text: &str) -> String {
        if self.color {
            text.bold().bright_magenta().to_string()
        } else {
            text.to_string()
        }
    }

    fn section(&self, text: &str) -> String {
        if self.color {
            text.bold().magenta().to_string()
        } else {
            text.to_string()
        }
    }

    fn label(&self, text: &str) -> String {
        if self.color {
            text.bold().bright_blue().to_string()
        } else {
            text.to_string()
        }
    }

    fn value(&self, text: &str) -> String {
        if self.color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }
}

/// `#<id> - <provider> → <client> (Paid|Unpaid)`
pub fn invoice_list_label(summary: &InvoiceSummary) -> String {
    format!(
        "#{} - {} → {} ({})",
        summary.id,
        summary.provider_name,
        summary.client_name,
        summary.status_label()
    )
}

pub fn render_invoice(data: &InvoiceData, style: &RenderStyle) -> String {
    let mut lines = vec![
        style.title(&format!("Invoice #{}", data.invoice.id)),
        String::new(),
        format!(
            "{} {}  |  {} {}",
            style.label("Date:"),
            style.value(&data.invoice.date_created.format("%Y-%m-%d").to_string()),
            style.label("Status:"),
            style.value(data.status_label())
        ),
        String::new(),
    ];

    for (heading, entity) in [("Provider", &data.provider), ("Client", &data.client)] {
        lines.push(style.section(heading));
        lines.extend(entity_lines(entity, style));
        lines.push(String::new());
    }

    lines.push(style.section("Items"));
    lines.extend(item_lines(&data.items, style));
    lines.push(String::new());
    lines.push(format!(
        "{} {}",
        style.label("Total:"),
        style.value(&style.money(data.total()))
    ));
    lines.join("\n")
}

fn entity_lines(entity: &Entity, style: &RenderStyle) -> Vec<String> {
    let mut lines = vec![format!("{} {}", style.label("Name:"), style.value(&entity.name))];
    let optional = [
        ("Address:", &entity.address),
        ("Email:", &entity.email),
        ("Phone:", &entity.phone),
    ];
    for (label, value) in optional {
        if let Some(value) = value.as_deref().filter(|value| !value.is_empty()) {
            lines.push(format!("{} {}", style.label(label), style.value(value)));
        }
    }
    lines
}

fn item_lines(items: &[StoredLineItem], style: &RenderStyle) -> Vec<String> {
    if items.is_empty() {
        return vec![style.value("No items")];
    }

    let header = format!(
        "{:<ITEM_WIDTH$}{:<QUANTITY_WIDTH$}{:<MONEY_WIDTH$}{}",
        "Item", "Quantity", "Cost/Unit", "Total"
    );
    let mut lines = vec![style.label(&header)];
    for stored in items {
        let item = &stored.item;
        let row = format!(
            "{:<ITEM_WIDTH$}{:<QUANTITY_WIDTH$}{:<MONEY_WIDTH$}{}",
            truncate_text(&item.name, ITEM_NAME_MAX),
            format!("{:.2}", item.quantity),
            style.money(item.unit_cost),
            style.money(item.line_total())
        );
        lines.push(style.value(&row));
    }
    lines
}
