//! Collaborator boundary for entity collections.
//!
//! The core only relies on the narrow CRUD contract in [`Repository`]; storage
//! and transport live behind it.

pub mod in_memory;
pub mod r#trait;

use async_trait::async_trait;

use facturo_core::Entity;
use facturo_events::{CollectionChange, EventBus, Subscription};

pub use in_memory::{InMemoryProfileStore, InMemoryRepository};
pub use r#trait::{IdGenerator, Observable, ProfileRepository, Repository, StoreError};

/// Adapter that publishes a [`CollectionChange`] after each successful write.
///
/// Ordering invariant: a change is published only once the write went through.
pub struct PublishingRepository<R, B> {
    inner: R,
    bus: B,
}

impl<R, B> PublishingRepository<R, B> {
    pub fn new(inner: R, bus: B) -> Self {
        Self { inner, bus }
    }
}

#[async_trait]
impl<E, R, B> Repository<E> for PublishingRepository<R, B>
where
    E: Entity,
    R: Repository<E>,
    B: EventBus<CollectionChange<E>>,
{
    async fn list(&self) -> Result<Vec<E>, StoreError> {
        self.inner.list().await
    }

    async fn get(&self, id: &E::Id) -> Result<Option<E>, StoreError> {
        self.inner.get(id).await
    }

    async fn set(&self, entity: E) -> Result<E, StoreError> {
        let stored = self.inner.set(entity).await?;
        self.bus
            .publish(CollectionChange::upserted(stored.clone()))
            .map_err(|err| StoreError::Publish(format!("{err:?}")))?;
        Ok(stored)
    }

    async fn delete(&self, entity: &E) -> Result<(), StoreError> {
        self.inner.delete(entity).await?;
        self.bus
            .publish(CollectionChange::deleted(entity.id().clone()))
            .map_err(|err| StoreError::Publish(format!("{err:?}")))?;
        Ok(())
    }
}

#[async_trait]
impl<E, R, B> Observable<E> for PublishingRepository<R, B>
where
    E: Entity,
    R: Repository<E>,
    B: EventBus<CollectionChange<E>>,
{
    async fn snapshot(&self) -> Result<Vec<E>, StoreError> {
        self.inner.list().await
    }

    fn subscribe(&self) -> Subscription<CollectionChange<E>> {
        self.bus.subscribe()
    }
}

impl<Id, R, B> IdGenerator<Id> for PublishingRepository<R, B>
where
    R: IdGenerator<Id>,
    B: Send + Sync,
{
    fn generate_id(&self) -> Id {
        self.inner.generate_id()
    }
}
