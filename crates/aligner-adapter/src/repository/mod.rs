//! Persistence Adapters - Repository implementations
//!
//! These implement the `MappingRepository` port from aligner-domain.

pub mod in_memory;
pub mod json_file;
pub mod record;
mod table;
