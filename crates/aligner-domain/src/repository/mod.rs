//! Repository Traits - The "Ports" of Hexagonal Architecture
//!
//! These traits define HOW the domain wants to persist mappings,
//! but NOT how it's actually done. That's the adapter's job.
//!
//! ```text
//! Domain Layer              │  Adapter Layer
//! ──────────────────────────┼────────────────────────────
//! trait MappingRepository   │  InMemoryMappingRepository
//!   fn find_by_key()        │  JsonFileMappingRepository
//!   fn create()             │
//! ```

pub mod mapping_repository;
