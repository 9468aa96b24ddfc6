//! aligner mappings command

use aligner_adapter::repository::record::MappingRecord;
use aligner_domain::MappingId;
use aligner_usecase::{CreateMappingInput, ManageMappings};
use clap::{Args, Subcommand};
use console::style;
use dialoguer::Confirm;

use crate::context::AppContext;
use crate::output;
use crate::GlobalArgs;

#[derive(Debug, Args)]
pub struct MappingsCommand {
    #[command(subcommand)]
    pub command: MappingsSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum MappingsSubcommand {
    /// List mappings of a vocabulary pair, or the most recent ones
    List {
        /// Source vocabulary
        #[arg(long = "from", requires = "target_vocab")]
        source_vocab: Option<String>,
        /// Target vocabulary
        #[arg(long = "to", requires = "source_vocab")]
        target_vocab: Option<String>,
        /// Show at most this many
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Add a mapping by hand
    Add {
        /// Term in the source vocabulary
        term: String,
        /// Term in the target vocabulary
        translation: String,
        #[arg(long = "from")]
        source_vocab: String,
        #[arg(long = "to")]
        target_vocab: String,
        /// Confidence in [0, 1] (default 0)
        #[arg(long)]
        confidence: Option<f64>,
    },
    /// Show one mapping
    Show {
        id: String,
    },
    /// Delete a mapping
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl MappingsCommand {
    pub async fn run(&self, globals: &GlobalArgs) -> anyhow::Result<()> {
        let ctx = AppContext::load(&globals.config)?;
        let manage = ManageMappings::new(ctx.repository);

        match &self.command {
            MappingsSubcommand::List {
                source_vocab,
                target_vocab,
                limit,
            } => {
                let pair = source_vocab.as_deref().zip(target_vocab.as_deref());
                let mut mappings = manage.list(pair).await?;
                if let Some(limit) = limit {
                    mappings.truncate(*limit);
                }

                if globals.json {
                    let records: Vec<MappingRecord> = mappings.iter().map(MappingRecord::from).collect();
                    output::print_json(&records)?;
                } else {
                    output::print_mapping_table(&mappings);
                }
            }
            MappingsSubcommand::Add {
                term,
                translation,
                source_vocab,
                target_vocab,
                confidence,
            } => {
                let mapping = manage
                    .create(CreateMappingInput {
                        source_vocab: source_vocab.clone(),
                        target_vocab: target_vocab.clone(),
                        source_term: term.clone(),
                        target_term: translation.clone(),
                        confidence: *confidence,
                    })
                    .await?;

                if globals.json {
                    output::print_json(&MappingRecord::from(&mapping))?;
                } else {
                    println!("{} Added {}", style("✓").green(), mapping.id());
                }
            }
            MappingsSubcommand::Show { id } => {
                let mapping = manage.get(&MappingId::new(id.as_str())).await?;
                if globals.json {
                    output::print_json(&MappingRecord::from(&mapping))?;
                } else {
                    output::print_mapping(&mapping);
                }
            }
            MappingsSubcommand::Delete { id, yes } => {
                let id = MappingId::new(id.as_str());
                let mapping = manage.get(&id).await?;

                if !yes {
                    let confirmed = Confirm::new()
                        .with_prompt(format!(
                            "Delete {} → {} ({}→{})?",
                            mapping.source_term(),
                            mapping.target_term(),
                            mapping.source_vocab(),
                            mapping.target_vocab()
                        ))
                        .default(false)
                        .interact()?;
                    if !confirmed {
                        println!("Aborted");
                        return Ok(());
                    }
                }

                manage.delete(&id).await?;
                if globals.json {
                    output::print_json(&serde_json::json!({ "deleted": id.as_str() }))?;
                } else {
                    println!("{} Deleted {}", style("✓").green(), id);
                }
            }
        }
        Ok(())
    }
}
