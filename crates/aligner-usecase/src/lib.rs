//! # Semantic Aligner Use Case Layer
//!
//! Application-specific business rules.
//! This layer orchestrates the flow of data between the domain and adapters.
//!
//! - [`TranslateMessage`] - cache-or-create translation of a message
//! - [`ManageMappings`] - operator CRUD over stored mappings
//! - [`ConfidenceAttestor`] - optional digest-and-threshold attachment

pub mod attestation;
pub mod error;
pub mod manage_mappings;
pub mod translate_message;

pub use aligner_domain;

pub use attestation::{AttestationOptions, ConfidenceAttestor, DEFAULT_DISTANCE_THRESHOLD};
pub use error::{ManagementError, TranslationError};
pub use manage_mappings::{CreateMappingInput, ManageMappings, RECENT_LIMIT};
pub use translate_message::{TranslateInput, TranslateMessage};

#[cfg(test)]
pub(crate) mod testing;
