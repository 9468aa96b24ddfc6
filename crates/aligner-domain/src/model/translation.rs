//! Translation request and result

use super::attestation::Attestation;
use super::mapping::VocabularyMapping;

/// A message to carry from one vocabulary into another
///
/// Vocabularies are opaque identifiers; any two strings form a pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub message: String,
    pub source_vocab: String,
    pub target_vocab: String,
}

impl TranslationRequest {
    pub fn new(
        message: impl Into<String>,
        source_vocab: impl Into<String>,
        target_vocab: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            source_vocab: source_vocab.into(),
            target_vocab: target_vocab.into(),
        }
    }
}

/// Outcome of one translation
///
/// `mappings_used` and `new_mappings_created` keep extraction order.
/// Together they hold one entry per resolved term.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationResult {
    pub original_message: String,
    pub translated_message: String,
    pub mappings_used: Vec<VocabularyMapping>,
    pub new_mappings_created: Vec<VocabularyMapping>,
    pub overall_confidence: f64,
    pub attestation: Option<Attestation>,
}

impl TranslationResult {
    /// Result for a message with nothing to translate
    pub fn unchanged(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            translated_message: message.clone(),
            original_message: message,
            mappings_used: Vec::new(),
            new_mappings_created: Vec::new(),
            overall_confidence: 1.0,
            attestation: None,
        }
    }

    /// Number of terms resolved (reused + created)
    pub fn resolved_terms(&self) -> usize {
        self.mappings_used.len() + self.new_mappings_created.len()
    }

    /// Every mapping touched by this translation, reused first
    pub fn all_mappings(&self) -> impl Iterator<Item = &VocabularyMapping> {
        self.mappings_used
            .iter()
            .chain(self.new_mappings_created.iter())
    }

    pub fn with_attestation(mut self, attestation: Attestation) -> Self {
        self.attestation = Some(attestation);
        self
    }
}
