//! VocabularyMapping - A learned equivalence between two vocabularies
//!
//! A mapping is an Entity: its `MappingId` is assigned by the store at
//! creation and never changes. The `MappingKey` is its natural key and
//! doubles as the translation cache key.

use std::time::SystemTime;

/// Unique identifier for a VocabularyMapping
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MappingId(String);

impl MappingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for MappingId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Natural key of a mapping: (source vocabulary, target vocabulary, source term)
///
/// Comparison is exact. Two keys that differ only by case are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MappingKey {
    source_vocab: String,
    target_vocab: String,
    source_term: String,
}

impl MappingKey {
    pub fn new(
        source_vocab: impl Into<String>,
        target_vocab: impl Into<String>,
        source_term: impl Into<String>,
    ) -> Self {
        Self {
            source_vocab: source_vocab.into(),
            target_vocab: target_vocab.into(),
            source_term: source_term.into(),
        }
    }

    pub fn source_vocab(&self) -> &str {
        &self.source_vocab
    }

    pub fn target_vocab(&self) -> &str {
        &self.target_vocab
    }

    pub fn source_term(&self) -> &str {
        &self.source_term
    }

    /// True if this key belongs to the given vocabulary pair
    pub fn is_pair(&self, source_vocab: &str, target_vocab: &str) -> bool {
        self.source_vocab == source_vocab && self.target_vocab == target_vocab
    }
}

impl core::fmt::Display for MappingKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}→{}:{}",
            self.source_vocab, self.target_vocab, self.source_term
        )
    }
}

/// Confidence score in the closed interval [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Confidence(f64);

impl Confidence {
    pub const ZERO: Confidence = Confidence(0.0);
    pub const FULL: Confidence = Confidence(1.0);

    /// Validate a raw score. NaN, infinities and anything outside [0, 1] are rejected.
    pub fn new(value: f64) -> Result<Self, ConfidenceError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConfidenceError { value })
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Raised when a confidence score falls outside [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceError {
    pub value: f64,
}

impl core::fmt::Display for ConfidenceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "confidence {} is outside [0, 1]", self.value)
    }
}

impl std::error::Error for ConfidenceError {}

/// Input for creating a mapping. The store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMapping {
    pub key: MappingKey,
    pub target_term: String,
    pub confidence: Confidence,
}

impl NewMapping {
    pub fn new(key: MappingKey, target_term: impl Into<String>, confidence: Confidence) -> Self {
        Self {
            key,
            target_term: target_term.into(),
            confidence,
        }
    }
}

/// VocabularyMapping - The central entity of the aligner
///
/// `target_term` and `confidence` are fixed once created. The only mutation
/// is the usage counter, bumped each time a translation reuses the mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct VocabularyMapping {
    id: MappingId,
    key: MappingKey,
    target_term: String,
    confidence: Confidence,
    usage_count: u64,
    created_at: SystemTime,
    updated_at: SystemTime,
}

impl VocabularyMapping {
    /// Materialise a freshly created mapping. Usage starts at zero.
    pub fn create(id: MappingId, input: NewMapping, now: SystemTime) -> Self {
        Self {
            id,
            key: input.key,
            target_term: input.target_term,
            confidence: input.confidence,
            usage_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a mapping from persisted fields
    pub fn restore(
        id: MappingId,
        key: MappingKey,
        target_term: impl Into<String>,
        confidence: Confidence,
        usage_count: u64,
        created_at: SystemTime,
        updated_at: SystemTime,
    ) -> Self {
        Self {
            id,
            key,
            target_term: target_term.into(),
            confidence,
            usage_count,
            created_at,
            updated_at,
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> &MappingId {
        &self.id
    }

    pub fn key(&self) -> &MappingKey {
        &self.key
    }

    pub fn source_vocab(&self) -> &str {
        self.key.source_vocab()
    }

    pub fn target_vocab(&self) -> &str {
        self.key.target_vocab()
    }

    pub fn source_term(&self) -> &str {
        self.key.source_term()
    }

    pub fn target_term(&self) -> &str {
        &self.target_term
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    pub fn usage_count(&self) -> u64 {
        self.usage_count
    }

    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }

    pub fn updated_at(&self) -> SystemTime {
        self.updated_at
    }

    // ========== Mutations ==========

    /// Count one reuse of this mapping
    pub fn record_use(&mut self, now: SystemTime) {
        self.usage_count = self.usage_count.saturating_add(1);
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn key() -> MappingKey {
        MappingKey::new("medical-v1", "consumer-health", "hypertension")
    }

    #[test]
    fn test_confidence_bounds() {
        assert!(Confidence::new(0.0).is_ok());
        assert!(Confidence::new(1.0).is_ok());
        assert!(Confidence::new(0.42).is_ok());

        assert!(Confidence::new(-0.01).is_err());
        assert!(Confidence::new(1.0001).is_err());
        assert!(Confidence::new(f64::NAN).is_err());
        assert!(Confidence::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_confidence_error_message() {
        let err = Confidence::new(1.5).unwrap_err();
        assert_eq!(err.to_string(), "confidence 1.5 is outside [0, 1]");
    }

    #[test]
    fn test_create_starts_unused() {
        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(10);
        let mapping = VocabularyMapping::create(
            MappingId::new("m-1"),
            NewMapping::new(key(), "high blood pressure", Confidence::new(0.95).unwrap()),
            now,
        );

        assert_eq!(mapping.usage_count(), 0);
        assert_eq!(mapping.created_at(), now);
        assert_eq!(mapping.updated_at(), now);
        assert_eq!(mapping.source_term(), "hypertension");
        assert_eq!(mapping.target_term(), "high blood pressure");
    }

    #[test]
    fn test_record_use() {
        let created = SystemTime::UNIX_EPOCH;
        let later = created + Duration::from_secs(60);
        let mut mapping = VocabularyMapping::create(
            MappingId::new("m-1"),
            NewMapping::new(key(), "high blood pressure", Confidence::FULL),
            created,
        );

        mapping.record_use(later);
        mapping.record_use(later);

        assert_eq!(mapping.usage_count(), 2);
        assert_eq!(mapping.created_at(), created);
        assert_eq!(mapping.updated_at(), later);
    }

    #[test]
    fn test_key_is_case_sensitive() {
        let lower = MappingKey::new("a", "b", "edema");
        let upper = MappingKey::new("a", "b", "Edema");
        assert_ne!(lower, upper);
        assert!(lower.is_pair("a", "b"));
        assert!(!lower.is_pair("b", "a"));
        assert_eq!(lower.to_string(), "a→b:edema");
    }
}
