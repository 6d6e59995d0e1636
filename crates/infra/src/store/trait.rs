use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use facturo_core::Entity;
use facturo_events::{CollectionChange, Subscription};
use facturo_profile::Profile;

/// Failure of an external collaborator call.
///
/// The core never retries; these surface to the caller as `persistence-failure`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not be reached or refused the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// An in-process lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,

    /// The write succeeded but its change notification could not be published.
    #[error("failed to publish change: {0}")]
    Publish(String),
}

/// CRUD contract of a collection collaborator (upsert by id).
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn list(&self) -> Result<Vec<E>, StoreError>;

    async fn get(&self, id: &E::Id) -> Result<Option<E>, StoreError>;

    /// Insert or replace the entity with the same id; returns what was persisted.
    async fn set(&self, entity: E) -> Result<E, StoreError>;

    /// Remove the entity. Removing an absent entity is not an error.
    async fn delete(&self, entity: &E) -> Result<(), StoreError>;
}

#[async_trait]
impl<E, R> Repository<E> for Arc<R>
where
    E: Entity,
    R: Repository<E> + ?Sized,
{
    async fn list(&self) -> Result<Vec<E>, StoreError> {
        (**self).list().await
    }

    async fn get(&self, id: &E::Id) -> Result<Option<E>, StoreError> {
        (**self).get(id).await
    }

    async fn set(&self, entity: E) -> Result<E, StoreError> {
        (**self).set(entity).await
    }

    async fn delete(&self, entity: &E) -> Result<(), StoreError> {
        (**self).delete(entity).await
    }
}

/// Source of fresh identifiers for new entities.
pub trait IdGenerator<Id>: Send + Sync {
    fn generate_id(&self) -> Id;
}

impl<Id, G> IdGenerator<Id> for Arc<G>
where
    G: IdGenerator<Id> + ?Sized,
{
    fn generate_id(&self) -> Id {
        (**self).generate_id()
    }
}

/// Storage of the single business profile.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn get(&self) -> Result<Option<Profile>, StoreError>;

    async fn set(&self, profile: Profile) -> Result<Profile, StoreError>;
}

#[async_trait]
impl<P> ProfileRepository for Arc<P>
where
    P: ProfileRepository + ?Sized,
{
    async fn get(&self) -> Result<Option<Profile>, StoreError> {
        (**self).get().await
    }

    async fn set(&self, profile: Profile) -> Result<Profile, StoreError> {
        (**self).set(profile).await
    }
}

/// Live view of a collection: current snapshot plus a change stream.
///
/// Subscribe first, then take the snapshot, to avoid missing a change made in
/// between.
#[async_trait]
pub trait Observable<E: Entity>: Send + Sync {
    async fn snapshot(&self) -> Result<Vec<E>, StoreError>;

    fn subscribe(&self) -> Subscription<CollectionChange<E>>;
}
