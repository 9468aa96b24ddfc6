//! TranslateMessage - Cache-or-create translation of a message
//!
//! ```text
//! caller ─▶ extract_terms ─▶ for each term:
//!                              find_by_key ─┬─ hit  ─▶ increment_usage
//!                                           └─ miss ─▶ translate_term ─▶ create
//!                              rewrite running message
//!           ─▶ mean confidence ─▶ optional attestation ─▶ caller
//! ```
//!
//! Terms are resolved one after another. Each rewrite applies to the
//! already rewritten message, so a later term can match text that an
//! earlier substitution introduced.

use aligner_domain::{
    confidence, rewrite, Confidence, MappingKey, MappingRepository, NewMapping, OracleError,
    RepositoryError, TermOracle, TranslationRequest, TranslationResult, VocabularyMapping,
};
use tracing::{debug, error, info, warn};

use crate::attestation::{AttestationOptions, ConfidenceAttestor};
use crate::error::TranslationError;

/// Boundary input: a request plus optional attestation settings
#[derive(Debug, Clone, PartialEq)]
pub struct TranslateInput {
    pub request: TranslationRequest,
    pub attestation: Option<AttestationOptions>,
}

impl TranslateInput {
    pub fn new(request: TranslationRequest) -> Self {
        Self {
            request,
            attestation: None,
        }
    }

    pub fn with_attestation(mut self, options: AttestationOptions) -> Self {
        self.attestation = Some(options);
        self
    }
}

/// How a single term was resolved
enum Resolution {
    Reused(VocabularyMapping),
    Created(VocabularyMapping),
}

impl Resolution {
    fn mapping(&self) -> &VocabularyMapping {
        match self {
            Resolution::Reused(mapping) | Resolution::Created(mapping) => mapping,
        }
    }
}

/// The translation orchestrator
///
/// Collaborators are injected; there is no process-wide store or client.
#[derive(Debug, Clone)]
pub struct TranslateMessage<R, O> {
    repository: R,
    oracle: O,
    attestor: ConfidenceAttestor,
}

impl<R, O> TranslateMessage<R, O>
where
    R: MappingRepository,
    O: TermOracle,
{
    pub fn new(repository: R, oracle: O) -> Self {
        Self {
            repository,
            oracle,
            attestor: ConfidenceAttestor::new(),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Boundary operation: validate, translate, optionally attest
    pub async fn translate(&self, input: TranslateInput) -> Result<TranslationResult, TranslationError> {
        validate(&input.request)?;

        let threshold = match &input.attestation {
            Some(options) if options.enabled => Some(options.resolved_threshold()?),
            _ => None,
        };

        let result = self.execute(&input.request).await?;

        match threshold {
            Some(threshold) => {
                let attestation = self.attestor.attest(&result, threshold)?;
                debug!(
                    valid = attestation.valid,
                    distance = attestation.semantic_distance,
                    threshold,
                    "attestation attached"
                );
                Ok(result.with_attestation(attestation))
            }
            None => Ok(result),
        }
    }

    /// Translate a message. Fails only when a collaborator fails.
    pub async fn execute(&self, request: &TranslationRequest) -> Result<TranslationResult, TranslationError> {
        let terms = self
            .oracle
            .extract_terms(&request.message, &request.source_vocab)
            .await
            .map_err(|e| {
                error!(error = %e, "term extraction failed");
                e
            })?;

        if terms.is_empty() {
            debug!("no terms extracted, message left unchanged");
            return Ok(TranslationResult::unchanged(request.message.clone()));
        }

        let mut translated_message = request.message.clone();
        let mut mappings_used = Vec::new();
        let mut new_mappings_created = Vec::new();

        for term in terms {
            if term.trim().is_empty() {
                debug!("skipping blank term");
                continue;
            }

            let key = MappingKey::new(
                request.source_vocab.as_str(),
                request.target_vocab.as_str(),
                term.as_str(),
            );
            let resolution = self.resolve(&key, &request.message).await?;

            translated_message =
                rewrite::replace_whole_word(&translated_message, &term, resolution.mapping().target_term());

            match resolution {
                Resolution::Reused(mapping) => mappings_used.push(mapping),
                Resolution::Created(mapping) => new_mappings_created.push(mapping),
            }
        }

        let mut result = TranslationResult {
            original_message: request.message.clone(),
            translated_message,
            mappings_used,
            new_mappings_created,
            overall_confidence: 1.0,
            attestation: None,
        };
        result.overall_confidence = confidence::mean(result.all_mappings().map(VocabularyMapping::confidence));

        info!(
            source = %request.source_vocab,
            target = %request.target_vocab,
            reused = result.mappings_used.len(),
            created = result.new_mappings_created.len(),
            confidence = result.overall_confidence,
            "message translated"
        );

        Ok(result)
    }

    async fn resolve(&self, key: &MappingKey, context: &str) -> Result<Resolution, TranslationError> {
        if let Some(existing) = self.repository.find_by_key(key).await.map_err(store_failure)? {
            debug!(key = %key, "cache hit");
            let updated = self
                .repository
                .increment_usage(existing.id())
                .await
                .map_err(store_failure)?;
            return Ok(Resolution::Reused(updated));
        }

        debug!(key = %key, "cache miss, asking oracle");
        let proposal = self
            .oracle
            .translate_term(key.source_term(), key.source_vocab(), key.target_vocab(), Some(context))
            .await
            .map_err(|e| {
                error!(key = %key, error = %e, "term translation failed");
                e
            })?;

        let confidence = Confidence::new(proposal.confidence).map_err(|e| {
            error!(key = %key, error = %e, "oracle returned an invalid confidence");
            OracleError::MalformedResponse {
                message: e.to_string(),
            }
        })?;

        let input = NewMapping::new(key.clone(), proposal.translated_term, confidence);
        match self.repository.create(input).await {
            Ok(created) => Ok(Resolution::Created(created)),
            Err(RepositoryError::AlreadyExists { key: conflict }) => {
                warn!(key = %key, "mapping created concurrently, reusing it");
                let existing = self
                    .repository
                    .find_by_key(key)
                    .await
                    .map_err(store_failure)?
                    .ok_or(RepositoryError::AlreadyExists { key: conflict })?;
                let updated = self
                    .repository
                    .increment_usage(existing.id())
                    .await
                    .map_err(store_failure)?;
                Ok(Resolution::Reused(updated))
            }
            Err(e) => Err(store_failure(e).into()),
        }
    }
}

fn store_failure(e: RepositoryError) -> RepositoryError {
    error!(error = %e, "mapping store failed");
    e
}

fn validate(request: &TranslationRequest) -> Result<(), TranslationError> {
    let missing: Vec<&str> = [
        ("message", &request.message),
        ("sourceVocab", &request.source_vocab),
        ("targetVocab", &request.target_vocab),
    ]
    .iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(name, _)| *name)
    .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(TranslationError::InvalidRequest(format!(
            "missing required fields: {}",
            missing.join(", ")
        )))
    }
}
