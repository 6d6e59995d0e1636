//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Every top-level entity lives in its own collection; `COLLECTION` names it
/// (e.g. in change notifications and logs).
pub trait Entity: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display + Send + Sync;

    /// Name of the collection holding this entity (e.g. `"clients"`).
    const COLLECTION: &'static str;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
