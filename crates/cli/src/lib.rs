//! # Semantic Aligner CLI
//!
//! Command implementations and the wiring that builds use cases from
//! `aligner.json`.

pub mod commands;
pub mod context;
pub mod output;

use std::path::PathBuf;

/// Options shared by every subcommand
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub config: PathBuf,
    pub json: bool,
}
