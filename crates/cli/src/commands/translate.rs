//! aligner translate command

use aligner_domain::TranslationRequest;
use aligner_usecase::{AttestationOptions, TranslateInput, TranslateMessage};
use clap::Args;

use crate::context::AppContext;
use crate::output::{self, TranslationView};
use crate::GlobalArgs;

#[derive(Debug, Args)]
pub struct TranslateCommand {
    /// Message to translate
    pub message: String,

    /// Source vocabulary
    #[arg(long = "from")]
    pub source_vocab: String,

    /// Target vocabulary
    #[arg(long = "to")]
    pub target_vocab: String,

    /// Attach a digest-and-threshold attestation
    #[arg(long)]
    pub attest: bool,

    /// Maximum semantic distance for the attestation (implies --attest)
    #[arg(long)]
    pub threshold: Option<f64>,
}

impl TranslateCommand {
    pub async fn run(&self, globals: &GlobalArgs) -> anyhow::Result<()> {
        let ctx = AppContext::load(&globals.config)?;
        let use_case = TranslateMessage::new(ctx.repository.clone(), ctx.oracle()?);

        let result = use_case.translate(self.input(&ctx)).await?;

        if globals.json {
            output::print_json(&TranslationView::from(&result))
        } else {
            output::print_translation(&result);
            Ok(())
        }
    }

    fn input(&self, ctx: &AppContext) -> TranslateInput {
        let input = TranslateInput::new(TranslationRequest::new(
            self.message.as_str(),
            self.source_vocab.as_str(),
            self.target_vocab.as_str(),
        ));

        match (self.attest, self.threshold) {
            (_, Some(threshold)) => input.with_attestation(AttestationOptions::with_threshold(threshold)),
            (true, None) => input.with_attestation(AttestationOptions::with_threshold(
                ctx.config.attestation.distance_threshold,
            )),
            (false, None) => input,
        }
    }
}
