//! MappingRecord - Persisted shape of a mapping
//!
//! This is the wire and file format every backend exposes: the natural
//! key, target term, confidence, usage count and two RFC 3339 timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use aligner_domain::{Confidence, MappingId, MappingKey, RepositoryError, VocabularyMapping};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingRecord {
    pub id: String,
    pub source_vocab: String,
    pub target_vocab: String,
    pub source_term: String,
    pub target_term: String,
    pub confidence: f64,
    #[serde(default)]
    pub usage_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&VocabularyMapping> for MappingRecord {
    fn from(mapping: &VocabularyMapping) -> Self {
        Self {
            id: mapping.id().to_string(),
            source_vocab: mapping.source_vocab().to_string(),
            target_vocab: mapping.target_vocab().to_string(),
            source_term: mapping.source_term().to_string(),
            target_term: mapping.target_term().to_string(),
            confidence: mapping.confidence().value(),
            usage_count: mapping.usage_count(),
            created_at: mapping.created_at().into(),
            updated_at: mapping.updated_at().into(),
        }
    }
}

impl TryFrom<MappingRecord> for VocabularyMapping {
    type Error = RepositoryError;

    fn try_from(record: MappingRecord) -> Result<Self, Self::Error> {
        let confidence = Confidence::new(record.confidence).map_err(|e| RepositoryError::PersistenceError {
            message: format!("mapping {}: {}", record.id, e),
        })?;

        Ok(VocabularyMapping::restore(
            MappingId::new(record.id),
            MappingKey::new(record.source_vocab, record.target_vocab, record.source_term),
            record.target_term,
            confidence,
            record.usage_count,
            record.created_at.into(),
            record.updated_at.into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_json_shape() {
        let json = r#"{
            "id": "c1",
            "sourceVocab": "medical-v1",
            "targetVocab": "consumer-health",
            "sourceTerm": "hypertension",
            "targetTerm": "high blood pressure",
            "confidence": 0.95,
            "usageCount": 5,
            "createdAt": "2024-03-01T10:00:00Z",
            "updatedAt": "2024-03-02T10:00:00Z"
        }"#;

        let record: MappingRecord = serde_json::from_str(json).unwrap();
        let mapping = VocabularyMapping::try_from(record.clone()).unwrap();

        assert_eq!(mapping.id().as_str(), "c1");
        assert_eq!(mapping.usage_count(), 5);
        assert_eq!(mapping.target_term(), "high blood pressure");
        assert_eq!(MappingRecord::from(&mapping), record);
    }

    #[test]
    fn test_out_of_range_confidence_is_corrupt_data() {
        let record = MappingRecord {
            id: "c2".to_string(),
            source_vocab: "a".to_string(),
            target_vocab: "b".to_string(),
            source_term: "x".to_string(),
            target_term: "y".to_string(),
            confidence: 4.0,
            usage_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(matches!(
            VocabularyMapping::try_from(record),
            Err(RepositoryError::PersistenceError { .. })
        ));
    }
}
