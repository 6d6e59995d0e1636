//! `facturo-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the entity/value-object traits and the shared error model.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ClientId, DocumentId, RecordId};
pub use value_object::ValueObject;

/// ISO-8601 timestamp with the UTC offset it was recorded in.
pub type Timestamp = chrono::DateTime<chrono::FixedOffset>;
