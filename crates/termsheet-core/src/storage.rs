//! Row-store contract consumed by the wizard, the commit adapter and the CLI.

use termsheet_domain::{
    Entity, EntityKind, Invoice, InvoiceData, InvoiceId, InvoiceSummary, ItemId, NewEntity,
    StoredLineItem,
};

use crate::CoreError;

/// Read-only lookup of providers and clients.
pub trait EntityDirectory {
    fn list_entities(&self, kind: EntityKind) -> Result<Vec<Entity>, CoreError>;

    fn list_providers(&self) -> Result<Vec<Entity>, CoreError> {
        self.list_entities(EntityKind::Provider)
    }

    fn list_clients(&self) -> Result<Vec<Entity>, CoreError> {
        self.list_entities(EntityKind::Client)
    }
}

/// Provider/client maintenance used by the list views and entity forms.
pub trait EntityStore: EntityDirectory {
    fn create_entity(&self, kind: EntityKind, fields: &NewEntity) -> Result<String, CoreError>;
    fn update_entity(&self, kind: EntityKind, id: &str, fields: &NewEntity)
        -> Result<(), CoreError>;
    fn delete_entity(&self, kind: EntityKind, id: &str) -> Result<(), CoreError>;
    fn get_entity(&self, kind: EntityKind, id: &str) -> Result<Entity, CoreError>;
}

/// Invoice header and line item persistence.
pub trait InvoiceStore: EntityDirectory {
    fn create_invoice(
        &self,
        provider_id: &str,
        client_id: &str,
        paid: bool,
    ) -> Result<InvoiceId, CoreError>;

    /// Fails with [`CoreError::NotFound`] when the invoice no longer exists.
    fn update_invoice_header(
        &self,
        invoice_id: InvoiceId,
        provider_id: &str,
        client_id: &str,
        paid: bool,
    ) -> Result<(), CoreError>;

    fn delete_invoice_item(&self, item_id: ItemId) -> Result<(), CoreError>;

    fn add_invoice_item(
        &self,
        invoice_id: InvoiceId,
        name: &str,
        quantity: f64,
        unit_cost: f64,
    ) -> Result<ItemId, CoreError>;

    /// Items of an invoice in insertion order.
    fn get_invoice_items(&self, invoice_id: InvoiceId) -> Result<Vec<StoredLineItem>, CoreError>;

    fn get_invoice(&self, invoice_id: InvoiceId) -> Result<Invoice, CoreError>;

    /// Newest first.
    fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, CoreError>;

    fn invoice_data(&self, invoice_id: InvoiceId) -> Result<InvoiceData, CoreError>;

    /// Removes the items of an invoice and then its header.
    fn delete_invoice(&self, invoice_id: InvoiceId) -> Result<(), CoreError>;

    /// Runs `f` as a single unit of work. Stores that support transactions
    /// roll back every statement issued by `f` when it fails.
    fn atomically<T, F>(&self, f: F) -> Result<T, CoreError>
    where
        Self: Sized,
        F: FnOnce(&Self) -> Result<T, CoreError>,
    {
        f(self)
    }
}
