//! Error types for the use case layer

use aligner_domain::{OracleError, RepositoryError};
use thiserror::Error;

/// Failure of a translation request
///
/// Collaborator failures are surfaced as-is, with their diagnostic detail.
/// Nothing is retried.
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("Invalid translation request: {0}")]
    InvalidRequest(String),

    #[error("Translation failed: {0}")]
    Store(#[from] RepositoryError),

    #[error("Translation failed: {0}")]
    Oracle(#[from] OracleError),

    #[error("Invalid distance threshold {0}: must be within [0, 1]")]
    InvalidThreshold(f64),
}

/// Failure of a mapping management operation
#[derive(Debug, Error)]
pub enum ManagementError {
    #[error("Invalid mapping input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Store(#[from] RepositoryError),
}
