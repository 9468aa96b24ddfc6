//! ManageMappings - Operator surface over stored mappings
//!
//! Listing, manual creation, inspection and deletion. Translation never
//! deletes mappings itself; removal only happens here.

use aligner_domain::{
    Confidence, MappingId, MappingKey, MappingRepository, NewMapping, RepositoryError, VocabularyMapping,
};
use tracing::info;

use crate::error::ManagementError;

/// How many mappings an unfiltered listing returns
pub const RECENT_LIMIT: usize = 100;

/// Manual mapping input
#[derive(Debug, Clone, PartialEq)]
pub struct CreateMappingInput {
    pub source_vocab: String,
    pub target_vocab: String,
    pub source_term: String,
    pub target_term: String,
    /// Defaults to 0.0 when omitted
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ManageMappings<R> {
    repository: R,
}

impl<R: MappingRepository> ManageMappings<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Mappings of one vocabulary pair (most used first), or the most
    /// recent mappings across all pairs
    pub async fn list(&self, pair: Option<(&str, &str)>) -> Result<Vec<VocabularyMapping>, ManagementError> {
        let mappings = match pair {
            Some((source, target)) => self.repository.find_all_by_vocabs(source, target).await?,
            None => self.repository.list_recent(RECENT_LIMIT).await?,
        };
        Ok(mappings)
    }

    pub async fn get(&self, id: &MappingId) -> Result<VocabularyMapping, ManagementError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound { id: id.to_string() }.into())
    }

    pub async fn create(&self, input: CreateMappingInput) -> Result<VocabularyMapping, ManagementError> {
        let missing: Vec<&str> = [
            ("sourceVocab", &input.source_vocab),
            ("targetVocab", &input.target_vocab),
            ("sourceTerm", &input.source_term),
            ("targetTerm", &input.target_term),
        ]
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

        if !missing.is_empty() {
            return Err(ManagementError::InvalidInput(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        let confidence = match input.confidence {
            Some(raw) => Confidence::new(raw).map_err(|e| ManagementError::InvalidInput(e.to_string()))?,
            None => Confidence::ZERO,
        };

        let mapping = self
            .repository
            .create(NewMapping::new(
                MappingKey::new(input.source_vocab, input.target_vocab, input.source_term),
                input.target_term,
                confidence,
            ))
            .await?;

        info!(id = %mapping.id(), key = %mapping.key(), "mapping created manually");
        Ok(mapping)
    }

    pub async fn delete(&self, id: &MappingId) -> Result<(), ManagementError> {
        self.repository.delete(id).await?;
        info!(id = %id, "mapping deleted");
        Ok(())
    }

    pub async fn count(&self) -> Result<usize, ManagementError> {
        Ok(self.repository.count().await?)
    }
}
