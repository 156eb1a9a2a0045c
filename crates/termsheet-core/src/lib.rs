//! termsheet-core
//!
//! Invoice authoring logic for termsheet.
//! Depends on termsheet-domain. No CLI, no terminal I/O, no SQL.

pub mod commit;
pub mod draft;
pub mod entity_service;
pub mod error;
pub mod line_items;
pub mod storage;
pub mod wizard;

pub use commit::{CommitAdapter, CommitPolicy};
pub use draft::{DraftMode, InvoiceDraft};
pub use entity_service::EntityService;
pub use error::CoreError;
pub use line_items::{ItemFields, LineItemCollection};
pub use storage::{EntityDirectory, EntityStore, InvoiceStore};
pub use wizard::{
    Advance, InvoiceWizard, ReplayPosition, SelectOption, StepInput, StepPrompt, WizardStep,
};
