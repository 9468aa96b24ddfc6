//! In-Memory Repository Implementation
//!
//! Simple in-memory implementation of the mapping store.
//! Useful for testing, development and single-process deployments.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::SystemTime;

use aligner_domain::{MappingId, MappingKey, MappingRepository, NewMapping, RepositoryError, VocabularyMapping};

use super::table::MappingTable;

/// In-memory Mapping Repository
///
/// Thread-safe implementation using RwLock. Clones share the same table.
/// The natural-key check and the insert happen under one write lock, so
/// racing creates for the same key leave exactly one mapping.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMappingRepository {
    table: Arc<RwLock<MappingTable>>,
}

impl InMemoryMappingRepository {
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(MappingTable::new())),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MappingTable>, RepositoryError> {
        self.table.read().map_err(|_| RepositoryError::PersistenceError {
            message: "Failed to acquire read lock".to_string(),
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MappingTable>, RepositoryError> {
        self.table.write().map_err(|_| RepositoryError::PersistenceError {
            message: "Failed to acquire write lock".to_string(),
        })
    }
}

impl MappingRepository for InMemoryMappingRepository {
    async fn find_by_key(&self, key: &MappingKey) -> Result<Option<VocabularyMapping>, RepositoryError> {
        Ok(self.read()?.find_by_key(key))
    }

    async fn find_by_id(&self, id: &MappingId) -> Result<Option<VocabularyMapping>, RepositoryError> {
        Ok(self.read()?.find_by_id(id))
    }

    async fn find_all_by_vocabs(
        &self,
        source_vocab: &str,
        target_vocab: &str,
    ) -> Result<Vec<VocabularyMapping>, RepositoryError> {
        Ok(self.read()?.find_all_by_vocabs(source_vocab, target_vocab))
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<VocabularyMapping>, RepositoryError> {
        Ok(self.read()?.list_recent(limit))
    }

    async fn create(&self, input: NewMapping) -> Result<VocabularyMapping, RepositoryError> {
        self.write()?.insert(input, SystemTime::now())
    }

    async fn increment_usage(&self, id: &MappingId) -> Result<VocabularyMapping, RepositoryError> {
        self.write()?.increment_usage(id, SystemTime::now())
    }

    async fn delete(&self, id: &MappingId) -> Result<(), RepositoryError> {
        self.write()?.remove(id).map(|_| ())
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.read()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aligner_domain::Confidence;

    fn new_mapping(term: &str, target: &str) -> NewMapping {
        NewMapping::new(
            MappingKey::new("medical-v1", "consumer-health", term),
            target,
            Confidence::new(0.9).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_mapping_repository() {
        let repo = InMemoryMappingRepository::new();

        let created = repo.create(new_mapping("edema", "swelling")).await.unwrap();
        assert_eq!(created.usage_count(), 0);

        let found = repo.find_by_key(created.key()).await.unwrap();
        assert_eq!(found.as_ref().map(|m| m.id()), Some(created.id()));

        let missing = repo
            .find_by_key(&MappingKey::new("medical-v1", "consumer-health", "Edema"))
            .await
            .unwrap();
        assert!(missing.is_none());

        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_key_rejected() {
        let repo = InMemoryMappingRepository::new();
        repo.create(new_mapping("edema", "swelling")).await.unwrap();

        let err = repo.create(new_mapping("edema", "puffiness")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::AlreadyExists { .. }));

        let kept = repo
            .find_by_key(&MappingKey::new("medical-v1", "consumer-health", "edema"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(kept.target_term(), "swelling");
    }

    #[tokio::test]
    async fn test_increment_and_delete() {
        let repo = InMemoryMappingRepository::new();
        let created = repo.create(new_mapping("edema", "swelling")).await.unwrap();

        let updated = repo.increment_usage(created.id()).await.unwrap();
        assert_eq!(updated.usage_count(), 1);
        assert!(updated.updated_at() >= created.updated_at());

        repo.delete(created.id()).await.unwrap();
        assert!(repo.find_by_id(created.id()).await.unwrap().is_none());

        assert!(matches!(
            repo.increment_usage(created.id()).await,
            Err(RepositoryError::NotFound { .. })
        ));
        assert!(matches!(
            repo.delete(created.id()).await,
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let repo = InMemoryMappingRepository::new();
        let other = repo.clone();
        repo.create(new_mapping("edema", "swelling")).await.unwrap();
        assert_eq!(other.count().await.unwrap(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_leave_one_mapping() {
        let repo = InMemoryMappingRepository::new();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.create(new_mapping("edema", &format!("swelling-{}", i))).await
                })
            })
            .collect();

        let mut created = 0;
        let mut rejected = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(RepositoryError::AlreadyExists { .. }) => rejected += 1,
                Err(other) => panic!("unexpected error: {}", other),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(rejected, 15);
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
