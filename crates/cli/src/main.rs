//! Semantic Aligner CLI
//!
//! Usage:
//!   aligner init [dir]                                   - Write a starter config and glossary
//!   aligner translate <message> --from <v> --to <v>      - Translate a message
//!   aligner mappings list [--from <v> --to <v>]          - List stored mappings
//!   aligner mappings add <term> <translation> --from --to
//!   aligner mappings show <id>
//!   aligner mappings delete <id> [--yes]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cli::commands::{InitCommand, MappingsCommand, TranslateCommand};
use cli::GlobalArgs;
use shared::DEFAULT_CONFIG_FILE;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aligner")]
#[command(about = "Semantic Aligner - Cached vocabulary translation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new aligner project
    Init(InitCommand),
    /// Translate a message between vocabularies
    Translate(TranslateCommand),
    /// Inspect and edit stored mappings
    Mappings(MappingsCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so --json output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let globals = GlobalArgs {
        config: cli.config,
        json: cli.json,
    };

    match cli.command {
        Commands::Init(cmd) => cmd.run(&globals),
        Commands::Translate(cmd) => cmd.run(&globals).await,
        Commands::Mappings(cmd) => cmd.run(&globals).await,
    }
}
