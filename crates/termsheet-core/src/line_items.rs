//! Line item entry: raw field validation and the ordered item list a draft owns.

use std::slice;

use termsheet_domain::LineItem;

use crate::CoreError;

/// Raw text of the three item fields, as typed into (or pre-filled in) a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFields {
    pub name: String,
    pub quantity: String,
    pub unit_cost: String,
}

impl ItemFields {
    pub fn new(
        name: impl Into<String>,
        quantity: impl Into<String>,
        unit_cost: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            unit_cost: unit_cost.into(),
        }
    }

    pub fn blank() -> Self {
        Self::default()
    }

    /// Pre-fill text for an existing item. Numbers use their shortest exact
    /// representation so submitting the fields unchanged yields the same item.
    pub fn from_item(item: &LineItem) -> Self {
        Self {
            name: item.name.clone(),
            quantity: edit_number(item.quantity),
            unit_cost: edit_number(item.unit_cost),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.quantity.is_empty() && self.unit_cost.is_empty()
    }
}

fn edit_number(value: f64) -> String {
    value.to_string()
}

/// Field checks shared by form validation and the storage boundary.
pub fn check_fields(name: &str, quantity: f64, unit_cost: f64) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::validation("item name is required"));
    }
    if !is_positive(quantity) {
        return Err(CoreError::validation("quantity must be positive"));
    }
    if !is_positive(unit_cost) {
        return Err(CoreError::validation("cost per unit must be positive"));
    }
    Ok(())
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Parses and checks raw item fields. The name is trimmed.
pub fn validate(fields: &ItemFields) -> Result<LineItem, CoreError> {
    let name = fields.name.trim();
    if name.is_empty() {
        return Err(CoreError::validation("item name is required"));
    }
    let quantity = parse_number(&fields.quantity, "quantity")?;
    let unit_cost = parse_number(&fields.unit_cost, "cost per unit")?;
    check_fields(name, quantity, unit_cost)?;
    Ok(LineItem::new(name, quantity, unit_cost))
}

fn parse_number(raw: &str, label: &str) -> Result<f64, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation(format!("{label} is required")));
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| CoreError::validation(format!("{label} must be a number")))
}

/// Ordered, index-addressable list of line items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineItemCollection {
    items: Vec<LineItem>,
}

impl LineItemCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<LineItem>) -> Self {
        Self { items }
    }

    pub fn append(&mut self, item: LineItem) {
        self.items.push(item);
    }

    pub fn replace_at(&mut self, index: usize, item: LineItem) -> Result<(), CoreError> {
        let len = self.items.len();
        let slot = self.items.get_mut(index).ok_or_else(|| {
            CoreError::InvalidOperation(format!(
                "item index {index} out of range (collection has {len} items)"
            ))
        })?;
        *slot = item;
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[LineItem] {
        &self.items
    }

    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .map(LineItem::line_total)
            .fold(0.0, |acc, total| acc + total)
    }
}

impl<'a> IntoIterator for &'a LineItemCollection {
    type Item = &'a LineItem;
    type IntoIter = slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
