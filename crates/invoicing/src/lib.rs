//! Quotations and invoices.
//!
//! This crate contains the document model and its derived fields (line amounts,
//! totals, display status) plus the factory building new documents. Pure domain
//! logic: no IO, no storage, no clock (callers pass `now`).

pub mod document;
pub mod factory;
pub mod status;

pub use document::{Document, DocumentType, Item, Totals};
pub use facturo_clients::ClientRef;
pub use facturo_core::Timestamp;
pub use factory::{
    PAYMENT_DEADLINE_DAYS, QUOTATION_VALIDITY_DAYS, create_invoice_import_skeleton,
    create_quotation,
};
pub use status::{STATUS_RULES, Status, TagColor, resolve_status};
