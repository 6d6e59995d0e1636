//! Accounting ledger (revenue/purchase book).
//!
//! Pure domain logic only: no IO, no persistence concerns. Records are
//! independent of quotations/invoices; both reference clients by id.

pub mod record;

pub use record::{Record, RecordType, revenue_for_year};
