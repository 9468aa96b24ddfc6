//! Attestation - Digest-and-threshold record attached to a translation
//!
//! NOT a zero-knowledge proof. The digests are a deterministic function of
//! the plaintext messages and the flag is a plain comparison. Nothing is
//! hidden and nothing is proven; it only lets a receiver check that the
//! texts it holds are the ones the confidence figure was computed for.

/// Attestation record
#[derive(Debug, Clone, PartialEq)]
pub struct Attestation {
    /// Hex digest of the original message
    pub source_digest: String,
    /// Hex digest of the translated message
    pub target_digest: String,
    /// 1 - overall confidence
    pub semantic_distance: f64,
    /// Maximum accepted distance
    pub distance_threshold: f64,
    /// distance <= threshold
    pub valid: bool,
}

impl Attestation {
    /// Threshold in thousandths, rounded down
    pub fn threshold_millis(&self) -> u64 {
        (self.distance_threshold * 1000.0).floor() as u64
    }

    /// Public signals: source digest, target digest, threshold in
    /// thousandths, and "1"/"0" for the validity flag
    pub fn public_signals(&self) -> Vec<String> {
        vec![
            self.source_digest.clone(),
            self.target_digest.clone(),
            self.threshold_millis().to_string(),
            if self.valid { "1" } else { "0" }.to_string(),
        ]
    }
}
