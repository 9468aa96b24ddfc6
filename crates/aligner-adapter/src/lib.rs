//! # Semantic Aligner Adapter Layer
//!
//! External system integrations (Hexagonal Architecture adapters).
//!
//! ## Structure
//!
//! - `gateway/` - Term oracle implementations (glossary file, LLM client)
//! - `repository/` - Mapping store implementations (memory, JSON file)

pub mod gateway;
pub mod repository;

pub use gateway::{glossary::GlossaryOracle, openai::OpenAiOracle, ConfiguredOracle};
pub use repository::{in_memory::InMemoryMappingRepository, json_file::JsonFileMappingRepository};
