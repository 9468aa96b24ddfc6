//! Rendering of results as text or JSON

use aligner_adapter::repository::record::MappingRecord;
use aligner_domain::{Attestation, TranslationResult, VocabularyMapping};
use console::style;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationView {
    pub original_message: String,
    pub translated_message: String,
    pub mappings_used: Vec<MappingRecord>,
    pub new_mappings_created: Vec<MappingRecord>,
    pub overall_confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attestation: Option<AttestationView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttestationView {
    pub source_digest: String,
    pub target_digest: String,
    pub semantic_distance: f64,
    pub distance_threshold: f64,
    pub valid: bool,
    pub public_signals: Vec<String>,
}

impl From<&Attestation> for AttestationView {
    fn from(attestation: &Attestation) -> Self {
        Self {
            source_digest: attestation.source_digest.clone(),
            target_digest: attestation.target_digest.clone(),
            semantic_distance: attestation.semantic_distance,
            distance_threshold: attestation.distance_threshold,
            valid: attestation.valid,
            public_signals: attestation.public_signals(),
        }
    }
}

impl From<&TranslationResult> for TranslationView {
    fn from(result: &TranslationResult) -> Self {
        Self {
            original_message: result.original_message.clone(),
            translated_message: result.translated_message.clone(),
            mappings_used: result.mappings_used.iter().map(MappingRecord::from).collect(),
            new_mappings_created: result.new_mappings_created.iter().map(MappingRecord::from).collect(),
            overall_confidence: result.overall_confidence,
            attestation: result.attestation.as_ref().map(AttestationView::from),
        }
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_translation(result: &TranslationResult) {
    println!("{}", style(&result.translated_message).bold());

    if result.resolved_terms() > 0 {
        println!();
        for mapping in &result.mappings_used {
            println!("  {} {}", style("cached").dim(), mapping_line(mapping));
        }
        for mapping in &result.new_mappings_created {
            println!("  {}    {}", style("new").cyan(), mapping_line(mapping));
        }
    }

    println!();
    println!("Confidence: {:.2}", result.overall_confidence);

    if let Some(attestation) = &result.attestation {
        let verdict = if attestation.valid {
            style("within threshold").green()
        } else {
            style("exceeds threshold").red()
        };
        println!(
            "Attestation: distance {:.3} / threshold {:.3} ({})",
            attestation.semantic_distance, attestation.distance_threshold, verdict
        );
        println!("  source {}", style(&attestation.source_digest).dim());
        println!("  target {}", style(&attestation.target_digest).dim());
    }
}

pub fn print_mapping_table(mappings: &[VocabularyMapping]) {
    if mappings.is_empty() {
        println!("No mappings found");
        return;
    }
    for mapping in mappings {
        println!(
            "{}  {}  {} {}",
            style(mapping.id()).dim(),
            mapping_line(mapping),
            style(format!("x{}", mapping.usage_count())).yellow(),
            style(format!("({}→{})", mapping.source_vocab(), mapping.target_vocab())).dim(),
        );
    }
}

pub fn print_mapping(mapping: &VocabularyMapping) {
    let record = MappingRecord::from(mapping);
    println!("{}", style(&record.id).bold());
    println!("  Vocabularies: {} → {}", record.source_vocab, record.target_vocab);
    println!("  Term:         {} → {}", record.source_term, record.target_term);
    println!("  Confidence:   {:.2}", record.confidence);
    println!("  Used:         {} times", record.usage_count);
    println!("  Created:      {}", record.created_at.to_rfc3339());
    println!("  Updated:      {}", record.updated_at.to_rfc3339());
}

fn mapping_line(mapping: &VocabularyMapping) -> String {
    format!(
        "{} → {} [{:.2}]",
        mapping.source_term(),
        mapping.target_term(),
        mapping.confidence().value()
    )
}
