//! Term Oracle - Extracts domain terms and proposes translations

use core::future::Future;

/// A proposed translation for a single term
///
/// `confidence` is the raw score reported by the oracle. Callers validate it.
#[derive(Debug, Clone, PartialEq)]
pub struct TermTranslation {
    pub translated_term: String,
    pub confidence: f64,
}

impl TermTranslation {
    pub fn new(translated_term: impl Into<String>, confidence: f64) -> Self {
        Self {
            translated_term: translated_term.into(),
            confidence,
        }
    }
}

/// Errors reported by an oracle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// Transport or service failure
    Unavailable { message: String },
    /// The oracle answered, but not with something usable
    MalformedResponse { message: String },
    /// The oracle has no translation for this term
    UnknownTerm { term: String },
}

impl core::fmt::Display for OracleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            OracleError::Unavailable { message } => {
                write!(f, "Term oracle unavailable: {}", message)
            }
            OracleError::MalformedResponse { message } => {
                write!(f, "Malformed oracle response: {}", message)
            }
            OracleError::UnknownTerm { term } => {
                write!(f, "No translation known for term: {}", term)
            }
        }
    }
}

impl std::error::Error for OracleError {}

/// Term Oracle Trait
///
/// This is a PORT in hexagonal architecture.
///
/// `extract_terms` may return an empty list and may return duplicates;
/// both are legal and handled by the caller. Confidence of exactly 0 or 1
/// is a valid answer from `translate_term`.
pub trait TermOracle: Send + Sync {
    /// Candidate terms of `vocabulary` found in `message`, in order
    fn extract_terms(
        &self,
        message: &str,
        vocabulary: &str,
    ) -> impl Future<Output = Result<Vec<String>, OracleError>> + Send;

    /// Propose a target-vocabulary equivalent for `term`
    fn translate_term(
        &self,
        term: &str,
        source_vocab: &str,
        target_vocab: &str,
        context: Option<&str>,
    ) -> impl Future<Output = Result<TermTranslation, OracleError>> + Send;
}
