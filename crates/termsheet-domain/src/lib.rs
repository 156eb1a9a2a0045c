//! termsheet-domain
//!
//! Pure domain models (providers, clients, invoices, line items).
//! No I/O, no CLI, no storage. Only data types and small derived values.

pub mod entity;
pub mod invoice;

pub use entity::*;
pub use invoice::*;
