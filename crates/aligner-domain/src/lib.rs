//! # Semantic Aligner Domain Layer
//!
//! Pure business logic for translating domain-specific terms between two
//! vocabularies and remembering every learned translation.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Domain Layer (This Crate)                     │
//! │  ┌─────────────────────────────────────────────────────────────┐│
//! │  │  model/     - Entities & Value Objects                      ││
//! │  │  repository/- Mapping store port (not implementations)      ││
//! │  │  gateway/   - Term oracle port (not implementations)        ││
//! │  │  service/   - Whole-word rewrite, confidence aggregation    ││
//! │  └─────────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Golden Rule
//!
//! **This crate has ZERO external dependencies.**
//!
//! Swapping the LLM behind the oracle or the database behind the store
//! does not change a line in here.

pub mod gateway;
pub mod model;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use model::{
    attestation::Attestation,
    mapping::{Confidence, ConfidenceError, MappingId, MappingKey, NewMapping, VocabularyMapping},
    translation::{TranslationRequest, TranslationResult},
};

pub use repository::mapping_repository::{MappingRepository, RepositoryError};

pub use gateway::term_oracle::{OracleError, TermOracle, TermTranslation};

pub use service::{confidence, rewrite};
