use termsheet_domain::{Invoice, InvoiceId, LineItem};

use crate::line_items::LineItemCollection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftMode {
    Create,
    Edit { invoice_id: InvoiceId },
}

/// In-progress, unpersisted state of an invoice being authored or edited.
///
/// In edit mode `cursor` walks the pre-existing items (`0..=existing_item_count`);
/// once it reaches `existing_item_count` every further item is a new append.
/// Provider and client ids are opaque here; the store enforces that they exist.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDraft {
    pub(crate) provider_id: String,
    pub(crate) client_id: String,
    pub(crate) items: LineItemCollection,
    pub(crate) paid: bool,
    pub(crate) mode: DraftMode,
    pub(crate) existing_item_count: usize,
    pub(crate) cursor: usize,
}

impl InvoiceDraft {
    pub fn new_create() -> Self {
        Self {
            provider_id: String::new(),
            client_id: String::new(),
            items: LineItemCollection::new(),
            paid: false,
            mode: DraftMode::Create,
            existing_item_count: 0,
            cursor: 0,
        }
    }

    /// A fully specified create-mode draft, ready to commit.
    pub fn create(
        provider_id: impl Into<String>,
        client_id: impl Into<String>,
        items: Vec<LineItem>,
        paid: bool,
    ) -> Self {
        Self {
            provider_id: provider_id.into(),
            client_id: client_id.into(),
            items: LineItemCollection::from_items(items),
            paid,
            ..Self::new_create()
        }
    }

    /// An edit-mode draft seeded from a persisted invoice and its items.
    pub fn from_existing(invoice: &Invoice, items: Vec<LineItem>) -> Self {
        let existing_item_count = items.len();
        Self {
            provider_id: invoice.provider_id.clone(),
            client_id: invoice.client_id.clone(),
            items: LineItemCollection::from_items(items),
            paid: invoice.paid,
            mode: DraftMode::Edit {
                invoice_id: invoice.id,
            },
            existing_item_count,
            cursor: 0,
        }
    }

    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn items(&self) -> &LineItemCollection {
        &self.items
    }

    pub fn paid(&self) -> bool {
        self.paid
    }

    pub fn mode(&self) -> DraftMode {
        self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, DraftMode::Edit { .. })
    }

    pub fn existing_item_count(&self) -> usize {
        self.existing_item_count
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True while pre-existing items are still being replayed.
    pub fn is_replaying(&self) -> bool {
        self.is_edit() && self.cursor < self.existing_item_count
    }

    pub fn total(&self) -> f64 {
        self.items.total()
    }
}
