//! Error types for the aligner

use thiserror::Error;

/// Error thrown when the configured oracle cannot be built
#[derive(Debug, Error)]
#[error("Oracle '{kind}' is misconfigured: {reason}")]
pub struct OracleConfigError {
    pub kind: String,
    pub reason: String,
}

/// General aligner error type
#[derive(Debug, Error)]
pub enum AlignerError {
    #[error(transparent)]
    OracleConfig(#[from] OracleConfigError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AlignerError>;
