//! Outbound Adapters - Term oracle implementations
//!
//! - `glossary` - deterministic, file-backed oracle
//! - `openai` - LLM oracle over an OpenAI-compatible chat API

pub mod glossary;
pub mod openai;

use aligner_domain::{OracleError, TermOracle, TermTranslation};
use shared::OracleConfig;

use self::glossary::GlossaryOracle;
use self::openai::OpenAiOracle;

/// The oracle selected by configuration
#[derive(Debug)]
pub enum ConfiguredOracle {
    Glossary(GlossaryOracle),
    OpenAi(OpenAiOracle),
}

impl ConfiguredOracle {
    pub fn from_config(config: &OracleConfig) -> shared::Result<Self> {
        match config {
            OracleConfig::Glossary { path } => Ok(Self::Glossary(GlossaryOracle::from_file(path)?)),
            OracleConfig::OpenAi { .. } => Ok(Self::OpenAi(OpenAiOracle::from_config(config)?)),
        }
    }
}

impl TermOracle for ConfiguredOracle {
    async fn extract_terms(&self, message: &str, vocabulary: &str) -> Result<Vec<String>, OracleError> {
        match self {
            Self::Glossary(oracle) => oracle.extract_terms(message, vocabulary).await,
            Self::OpenAi(oracle) => oracle.extract_terms(message, vocabulary).await,
        }
    }

    async fn translate_term(
        &self,
        term: &str,
        source_vocab: &str,
        target_vocab: &str,
        context: Option<&str>,
    ) -> Result<TermTranslation, OracleError> {
        match self {
            Self::Glossary(oracle) => {
                oracle
                    .translate_term(term, source_vocab, target_vocab, context)
                    .await
            }
            Self::OpenAi(oracle) => {
                oracle
                    .translate_term(term, source_vocab, target_vocab, context)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::json_file::JsonFileMappingRepository;
    use aligner_domain::{MappingRepository, TranslationRequest};
    use aligner_usecase::{AttestationOptions, TranslateInput, TranslateMessage};

    const GLOSSARY: &str = r#"
pairs:
  - source: medical-v1
    target: consumer-health
    terms:
      - term: hypertension
        translation: high blood pressure
        confidence: 0.9
      - term: edema
        translation: swelling
        confidence: 0.7
"#;

    fn glossary_config(dir: &std::path::Path) -> OracleConfig {
        let path = dir.join("glossary.yaml");
        std::fs::write(&path, GLOSSARY).unwrap();
        OracleConfig::Glossary { path }
    }

    #[tokio::test]
    async fn test_translation_reuses_persisted_mappings() {
        let dir = tempfile::tempdir().unwrap();
        let oracle = ConfiguredOracle::from_config(&glossary_config(dir.path())).unwrap();
        let store_path = dir.path().join("mappings.json");
        let request = TranslationRequest::new(
            "Patient has hypertension and edema",
            "medical-v1",
            "consumer-health",
        );

        let first = TranslateMessage::new(JsonFileMappingRepository::open(&store_path).unwrap(), oracle)
            .execute(&request)
            .await
            .unwrap();
        assert_eq!(first.translated_message, "Patient has high blood pressure and swelling");
        assert_eq!(first.new_mappings_created.len(), 2);
        assert!((first.overall_confidence - 0.8).abs() < 1e-9);

        // A fresh process: new store handle, same file
        let oracle = ConfiguredOracle::from_config(&glossary_config(dir.path())).unwrap();
        let use_case = TranslateMessage::new(JsonFileMappingRepository::open(&store_path).unwrap(), oracle);
        let second = use_case
            .translate(TranslateInput::new(request).with_attestation(AttestationOptions::enabled()))
            .await
            .unwrap();

        assert_eq!(second.translated_message, first.translated_message);
        assert!(second.new_mappings_created.is_empty());
        assert_eq!(second.mappings_used.len(), 2);
        assert!(second.mappings_used.iter().all(|m| m.usage_count() == 1));
        assert!(second.attestation.unwrap().valid);
        assert_eq!(use_case.repository().count().await.unwrap(), 2);
    }

    #[test]
    fn test_openai_without_key_is_misconfigured() {
        let config: OracleConfig =
            serde_json::from_value(serde_json::json!({ "kind": "openai", "apiKeyEnv": "ALIGNER_UNSET_TEST_KEY" }))
                .unwrap();
        assert!(matches!(
            ConfiguredOracle::from_config(&config),
            Err(shared::AlignerError::OracleConfig(_))
        ));
    }
}
