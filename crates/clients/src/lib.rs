//! Clients domain module.
//!
//! Clients are owned by the user and referenced by id from documents and
//! accounting records. Pure domain logic only (no IO, no storage).

pub mod client;

pub use client::{Client, ClientRef};
