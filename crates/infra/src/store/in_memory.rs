use std::sync::RwLock;

use async_trait::async_trait;

use facturo_core::Entity;
use facturo_profile::Profile;

use super::r#trait::{IdGenerator, ProfileRepository, Repository, StoreError};

/// In-memory collection keyed by entity id.
///
/// Intended for tests/dev. Keeps insertion order; an upsert replaces the entity in
/// place.
#[derive(Debug)]
pub struct InMemoryRepository<E> {
    entities: RwLock<Vec<E>>,
}

impl<E> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self::with_entities(Vec::new())
    }

    pub fn with_entities(entities: Vec<E>) -> Self {
        Self {
            entities: RwLock::new(entities),
        }
    }

    pub fn len(&self) -> usize {
        self.entities.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    async fn list(&self) -> Result<Vec<E>, StoreError> {
        let entities = self.entities.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entities.clone())
    }

    async fn get(&self, id: &E::Id) -> Result<Option<E>, StoreError> {
        let entities = self.entities.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entities.iter().find(|e| e.id() == id).cloned())
    }

    async fn set(&self, entity: E) -> Result<E, StoreError> {
        let mut entities = self.entities.write().map_err(|_| StoreError::Poisoned)?;
        match entities.iter_mut().find(|e| e.id() == entity.id()) {
            Some(existing) => *existing = entity.clone(),
            None => entities.push(entity.clone()),
        }
        tracing::debug!(collection = E::COLLECTION, id = %entity.id(), "entity stored");
        Ok(entity)
    }

    async fn delete(&self, entity: &E) -> Result<(), StoreError> {
        let mut entities = self.entities.write().map_err(|_| StoreError::Poisoned)?;
        entities.retain(|e| e.id() != entity.id());
        tracing::debug!(collection = E::COLLECTION, id = %entity.id(), "entity deleted");
        Ok(())
    }
}

/// Fresh random ids (UUIDv7), no ordering guarantee relied upon.
impl<E> IdGenerator<E::Id> for InMemoryRepository<E>
where
    E: Entity,
    E::Id: Default,
{
    fn generate_id(&self) -> E::Id {
        E::Id::default()
    }
}

/// Single-slot profile store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profile: RwLock<Option<Profile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: Profile) -> Self {
        Self {
            profile: RwLock::new(Some(profile)),
        }
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileStore {
    async fn get(&self) -> Result<Option<Profile>, StoreError> {
        let profile = self.profile.read().map_err(|_| StoreError::Poisoned)?;
        Ok(profile.clone())
    }

    async fn set(&self, profile: Profile) -> Result<Profile, StoreError> {
        let mut slot = self.profile.write().map_err(|_| StoreError::Poisoned)?;
        *slot = Some(profile.clone());
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use facturo_clients::Client;
    use facturo_core::{ClientId, DocumentId};
    use facturo_invoicing::Document;

    use super::*;

    fn test_client(name: &str) -> Client {
        Client::new(ClientId::new(), name, "1 rue", "75001", "Paris", "France")
    }

    #[tokio::test]
    async fn set_upserts_by_id_in_place() {
        let repo: InMemoryRepository<Client> = InMemoryRepository::new();
        let a = repo.set(test_client("A")).await.unwrap();
        repo.set(test_client("B")).await.unwrap();

        let mut renamed = a.clone();
        renamed.name = "A2".to_string();
        repo.set(renamed).await.unwrap();

        let names: Vec<_> = repo.list().await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["A2", "B"]);
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn get_returns_none_for_unknown_id() {
        let repo: InMemoryRepository<Client> = InMemoryRepository::new();
        assert_eq!(repo.get(&ClientId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let repo: InMemoryRepository<Client> = InMemoryRepository::new();
        let a = repo.set(test_client("A")).await.unwrap();

        repo.delete(&a).await.unwrap();
        repo.delete(&a).await.unwrap();

        assert!(repo.is_empty());
    }

    #[test]
    fn generated_ids_are_distinct() {
        let repo: InMemoryRepository<Document> = InMemoryRepository::new();
        let a: DocumentId = repo.generate_id();
        let b: DocumentId = repo.generate_id();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn profile_store_starts_empty() {
        let store = InMemoryProfileStore::new();
        assert_eq!(store.get().await.unwrap(), None);

        let profile = Profile {
            first_name: Some("Jeanne".to_string()),
            ..Profile::default()
        };
        store.set(profile.clone()).await.unwrap();
        assert_eq!(store.get().await.unwrap(), Some(profile));
    }
}
