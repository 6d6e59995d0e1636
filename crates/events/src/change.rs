//! Collection change events.

use chrono::{DateTime, Utc};

use facturo_core::Entity;

use crate::event::Event;

/// A write that happened on an entity collection.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionChange<E: Entity> {
    /// The entity was created or replaced (upsert by id).
    Upserted { entity: E, occurred_at: DateTime<Utc> },
    /// The entity with this id was removed.
    Deleted { id: E::Id, occurred_at: DateTime<Utc> },
}

impl<E: Entity> CollectionChange<E> {
    pub fn upserted(entity: E) -> Self {
        Self::Upserted {
            entity,
            occurred_at: Utc::now(),
        }
    }

    pub fn deleted(id: E::Id) -> Self {
        Self::Deleted {
            id,
            occurred_at: Utc::now(),
        }
    }

    /// Collection the change belongs to.
    pub fn collection(&self) -> &'static str {
        E::COLLECTION
    }

    /// Identifier of the entity affected by the change.
    pub fn entity_id(&self) -> &E::Id {
        match self {
            Self::Upserted { entity, .. } => entity.id(),
            Self::Deleted { id, .. } => id,
        }
    }
}

impl<E: Entity> Event for CollectionChange<E> {
    fn event_type(&self) -> &'static str {
        match self {
            Self::Upserted { .. } => "collection.upserted",
            Self::Deleted { .. } => "collection.deleted",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            Self::Upserted { occurred_at, .. } => *occurred_at,
            Self::Deleted { occurred_at, .. } => *occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: u32,
    }

    impl Entity for Note {
        type Id = u32;
        const COLLECTION: &'static str = "notes";

        fn id(&self) -> &u32 {
            &self.id
        }
    }

    #[test]
    fn upserted_change_exposes_entity_id() {
        let change = CollectionChange::upserted(Note { id: 7 });
        assert_eq!(*change.entity_id(), 7);
        assert_eq!(change.collection(), "notes");
        assert_eq!(change.event_type(), "collection.upserted");
    }

    #[test]
    fn deleted_change_has_its_own_type() {
        let change: CollectionChange<Note> = CollectionChange::deleted(3);
        assert_eq!(*change.entity_id(), 3);
        assert_eq!(change.event_type(), "collection.deleted");
        assert_eq!(change.version(), 1);
    }
}
