//! ConfidenceAttestor - Digest-and-threshold attachment
//!
//! The attestation pins a translation result to the exact message texts
//! (BLAKE3 digests) and records whether `1 - overall_confidence` stayed
//! within a caller-chosen distance threshold.
//!
//! This is a checksum, not a proof. The digests are a deterministic
//! function of the plaintext and anyone holding the texts can recompute
//! them. Do not present it as hiding anything or as cryptographic evidence
//! that the translation is faithful.

use aligner_domain::{Attestation, TranslationResult};

use crate::error::TranslationError;

/// Threshold used when the caller asks for an attestation without one
pub const DEFAULT_DISTANCE_THRESHOLD: f64 = 0.3;

/// Caller-side attestation settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttestationOptions {
    pub enabled: bool,
    pub distance_threshold: Option<f64>,
}

impl AttestationOptions {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            distance_threshold: None,
        }
    }

    pub fn enabled() -> Self {
        Self {
            enabled: true,
            distance_threshold: None,
        }
    }

    pub fn with_threshold(distance_threshold: f64) -> Self {
        Self {
            enabled: true,
            distance_threshold: Some(distance_threshold),
        }
    }

    /// The threshold to apply, checked to lie within [0, 1]
    pub fn resolved_threshold(&self) -> Result<f64, TranslationError> {
        check_threshold(self.distance_threshold.unwrap_or(DEFAULT_DISTANCE_THRESHOLD))
    }
}

impl Default for AttestationOptions {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Builds and re-checks attestations
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceAttestor;

impl ConfidenceAttestor {
    pub fn new() -> Self {
        Self
    }

    /// Attest an already computed result
    pub fn attest(&self, result: &TranslationResult, distance_threshold: f64) -> Result<Attestation, TranslationError> {
        let distance_threshold = check_threshold(distance_threshold)?;
        let semantic_distance = 1.0 - result.overall_confidence;

        Ok(Attestation {
            source_digest: digest(&result.original_message),
            target_digest: digest(&result.translated_message),
            semantic_distance,
            distance_threshold,
            valid: semantic_distance <= distance_threshold,
        })
    }

    /// True if the attestation matches both texts and its flag is consistent
    /// with its own distance and threshold
    pub fn verify(&self, attestation: &Attestation, original: &str, translated: &str) -> bool {
        attestation.source_digest == digest(original)
            && attestation.target_digest == digest(translated)
            && attestation.valid == (attestation.semantic_distance <= attestation.distance_threshold)
    }
}

/// Hex BLAKE3 digest of a message
pub fn digest(message: &str) -> String {
    blake3::hash(message.as_bytes()).to_hex().to_string()
}

fn check_threshold(threshold: f64) -> Result<f64, TranslationError> {
    if threshold.is_finite() && (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(TranslationError::InvalidThreshold(threshold))
    }
}
