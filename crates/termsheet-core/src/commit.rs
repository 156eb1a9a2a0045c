//! Turns a completed draft into storage calls.

use termsheet_domain::{InvoiceId, LineItem};
use tracing::{debug, info, warn};

use crate::{
    draft::{DraftMode, InvoiceDraft},
    line_items::check_fields,
    storage::InvoiceStore,
    CoreError,
};

/// How a multi-statement commit is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitPolicy {
    /// The whole commit succeeds or leaves the store untouched.
    #[default]
    Atomic,
    /// Statements apply one by one; a failure keeps whatever was written
    /// before it and is reported to the caller.
    BestEffort,
}

impl CommitPolicy {
    pub fn from_atomic_flag(atomic: bool) -> Self {
        if atomic {
            CommitPolicy::Atomic
        } else {
            CommitPolicy::BestEffort
        }
    }
}

pub struct CommitAdapter<'s, S> {
    store: &'s S,
    policy: CommitPolicy,
}

impl<'s, S: InvoiceStore> CommitAdapter<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            policy: CommitPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: CommitPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Create mode inserts a header then every item in order. Edit mode
    /// updates the header, deletes every stored item of the invoice and
    /// re-inserts the draft's items in order.
    pub fn commit(&self, draft: &InvoiceDraft) -> Result<InvoiceId, CoreError> {
        let result = match self.policy {
            CommitPolicy::Atomic => self.store.atomically(|store| write_draft(store, draft)),
            CommitPolicy::BestEffort => write_draft(self.store, draft),
        };
        match &result {
            Ok(id) => info!(
                invoice_id = id,
                items = draft.items().len(),
                paid = draft.paid(),
                "invoice committed"
            ),
            Err(err) => warn!(policy = ?self.policy, error = %err, "invoice commit failed"),
        }
        result
    }
}

fn write_draft<S: InvoiceStore>(store: &S, draft: &InvoiceDraft) -> Result<InvoiceId, CoreError> {
    match draft.mode() {
        DraftMode::Create => {
            let invoice_id =
                store.create_invoice(draft.provider_id(), draft.client_id(), draft.paid())?;
            debug!(invoice_id, "invoice header inserted");
            insert_items(store, invoice_id, draft.items().as_slice())?;
            Ok(invoice_id)
        }
        DraftMode::Edit { invoice_id } => {
            store.update_invoice_header(
                invoice_id,
                draft.provider_id(),
                draft.client_id(),
                draft.paid(),
            )?;
            let stale = store.get_invoice_items(invoice_id)?;
            debug!(invoice_id, stale = stale.len(), "replacing invoice items");
            for stored in stale {
                store.delete_invoice_item(stored.id)?;
            }
            insert_items(store, invoice_id, draft.items().as_slice())?;
            Ok(invoice_id)
        }
    }
}

fn insert_items<S: InvoiceStore>(
    store: &S,
    invoice_id: InvoiceId,
    items: &[LineItem],
) -> Result<(), CoreError> {
    for (position, item) in items.iter().enumerate() {
        check_fields(&item.name, item.quantity, item.unit_cost).map_err(|err| {
            warn!(invoice_id, position, error = %err, "rejected item at commit");
            err
        })?;
        store.add_invoice_item(invoice_id, &item.name, item.quantity, item.unit_cost)?;
    }
    Ok(())
}
