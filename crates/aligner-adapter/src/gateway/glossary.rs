//! GlossaryOracle - Deterministic term oracle backed by a YAML glossary
//!
//! ```yaml
//! pairs:
//!   - source: medical-v1
//!     target: consumer-health
//!     terms:
//!       - term: hypertension
//!         translation: high blood pressure
//!         confidence: 0.95
//! ```
//!
//! Extraction finds the glossary terms of the source vocabulary that occur
//! in the message as whole words, ordered by first occurrence.

use std::collections::HashSet;
use std::path::Path;

use aligner_domain::{rewrite, OracleError, TermOracle, TermTranslation};
use serde::{Deserialize, Serialize};
use shared::AlignerError;

/// Glossary file contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Glossary {
    #[serde(default)]
    pub pairs: Vec<GlossaryPair>,
}

/// Terms for one vocabulary pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlossaryPair {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub terms: Vec<GlossaryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    pub term: String,
    pub translation: String,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

fn default_confidence() -> f64 {
    1.0
}

#[derive(Debug, Clone, Default)]
pub struct GlossaryOracle {
    glossary: Glossary,
}

impl GlossaryOracle {
    pub fn new(glossary: Glossary) -> Self {
        Self { glossary }
    }

    /// Load a glossary from a YAML file
    pub fn from_file(path: &Path) -> shared::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AlignerError::Config(format!("cannot read glossary {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
            .map_err(|e| AlignerError::Config(format!("invalid glossary {}: {}", path.display(), e)))
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        let glossary: Glossary = serde_yaml::from_str(content)?;
        Ok(Self::new(glossary))
    }

    pub fn glossary(&self) -> &Glossary {
        &self.glossary
    }

    fn lookup(&self, term: &str, source_vocab: &str, target_vocab: &str) -> Option<&GlossaryEntry> {
        let wanted = term.to_lowercase();
        self.glossary
            .pairs
            .iter()
            .filter(|p| p.source == source_vocab && p.target == target_vocab)
            .flat_map(|p| p.terms.iter())
            .find(|e| e.term.to_lowercase() == wanted)
    }
}

impl TermOracle for GlossaryOracle {
    async fn extract_terms(&self, message: &str, vocabulary: &str) -> Result<Vec<String>, OracleError> {
        let mut seen = HashSet::new();
        let mut found: Vec<(usize, &str)> = Vec::new();

        let candidates = self
            .glossary
            .pairs
            .iter()
            .filter(|p| p.source == vocabulary)
            .flat_map(|p| p.terms.iter());

        for entry in candidates {
            if !seen.insert(entry.term.to_lowercase()) {
                continue;
            }
            if let Some(first) = rewrite::find_whole_word(message, &entry.term).first() {
                found.push((first.start, entry.term.as_str()));
            }
        }

        // Earliest first; at the same offset the longer term wins
        found.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| b.1.len().cmp(&a.1.len())));
        Ok(found.into_iter().map(|(_, term)| term.to_string()).collect())
    }

    async fn translate_term(
        &self,
        term: &str,
        source_vocab: &str,
        target_vocab: &str,
        _context: Option<&str>,
    ) -> Result<TermTranslation, OracleError> {
        self.lookup(term, source_vocab, target_vocab)
            .map(|e| TermTranslation::new(e.translation.clone(), e.confidence))
            .ok_or_else(|| OracleError::UnknownTerm {
                term: term.to_string(),
            })
    }
}
