//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity: two of them with the same attribute values are
/// equal. Document lines and computed totals are value objects; clients and
/// documents are entities.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Totals { ht: Decimal, tva: Decimal, ttc: Decimal }
///
/// impl ValueObject for Totals {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
