//! # Semantic Aligner Shared
//!
//! Configuration and error types used across the aligner crates.

pub mod config;
pub mod error;

// Re-exports
pub use config::*;
pub use error::*;
