//! Mapping Repository - Abstract persistence for VocabularyMappings
//!
//! The store exclusively owns persisted mappings. Callers only ever hold
//! copies returned from these calls.

use core::future::Future;

use crate::model::mapping::{MappingId, MappingKey, NewMapping, VocabularyMapping};

/// Errors that can occur during repository operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No mapping with this id
    NotFound { id: String },
    /// A mapping with this natural key already exists
    AlreadyExists { key: String },
    /// Backend failure (lock poisoned, I/O, corrupt data)
    PersistenceError { message: String },
}

impl core::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RepositoryError::NotFound { id } => {
                write!(f, "Mapping not found: {}", id)
            }
            RepositoryError::AlreadyExists { key } => {
                write!(f, "Mapping already exists: {}", key)
            }
            RepositoryError::PersistenceError { message } => {
                write!(f, "Persistence error: {}", message)
            }
        }
    }
}

impl std::error::Error for RepositoryError {}

/// Mapping Repository Trait
///
/// This is a PORT in hexagonal architecture.
///
/// All operations take `&self`: concurrent translations share one store,
/// so implementations bring their own interior locking. Uniqueness of the
/// natural key is the store's job; `create` must fail with
/// `AlreadyExists` rather than write a second mapping for the same key.
/// No operation may expose a partial write to another operation.
pub trait MappingRepository: Send + Sync {
    /// Look up by natural key. A miss is `Ok(None)`, never an error.
    fn find_by_key(
        &self,
        key: &MappingKey,
    ) -> impl Future<Output = Result<Option<VocabularyMapping>, RepositoryError>> + Send;

    /// Look up by id
    fn find_by_id(
        &self,
        id: &MappingId,
    ) -> impl Future<Output = Result<Option<VocabularyMapping>, RepositoryError>> + Send;

    /// All mappings of one vocabulary pair, most used first
    fn find_all_by_vocabs(
        &self,
        source_vocab: &str,
        target_vocab: &str,
    ) -> impl Future<Output = Result<Vec<VocabularyMapping>, RepositoryError>> + Send;

    /// The newest mappings across all pairs, newest first
    fn list_recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<VocabularyMapping>, RepositoryError>> + Send;

    /// Persist a new mapping with usage count 0
    fn create(
        &self,
        input: NewMapping,
    ) -> impl Future<Output = Result<VocabularyMapping, RepositoryError>> + Send;

    /// Bump the usage counter and return the updated mapping
    fn increment_usage(
        &self,
        id: &MappingId,
    ) -> impl Future<Output = Result<VocabularyMapping, RepositoryError>> + Send;

    /// Remove a mapping
    fn delete(&self, id: &MappingId) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Count all mappings
    fn count(&self) -> impl Future<Output = Result<usize, RepositoryError>> + Send;
}
