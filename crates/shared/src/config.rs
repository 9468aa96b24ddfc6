//! Configuration types for the aligner

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the configuration file
pub const DEFAULT_CONFIG_FILE: &str = "aligner.json";

/// Top-level configuration (aligner.json)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignerConfig {
    /// Where mappings are persisted
    #[serde(default)]
    pub store: StoreConfig,

    /// Which term oracle to use
    #[serde(default)]
    pub oracle: OracleConfig,

    /// Attestation defaults
    #[serde(default)]
    pub attestation: AttestationConfig,
}

impl AlignerConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults if the file is absent
    pub fn load_or_default(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write configuration as pretty JSON
    pub fn write_to(&self, path: &Path) -> crate::Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Resolve relative paths against the directory holding the config file
    pub fn resolve_paths(mut self, base_dir: &Path) -> Self {
        self.store.path = resolve(base_dir, &self.store.path);
        if let OracleConfig::Glossary { path } = &mut self.oracle {
            *path = resolve(base_dir, path);
        }
        self
    }

    fn validate(&self) -> crate::Result<()> {
        let threshold = self.attestation.distance_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(crate::AlignerError::Config(format!(
                "attestation.distanceThreshold must be within [0, 1], got {}",
                threshold
            )));
        }
        Ok(())
    }
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Mapping store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// JSON file holding the mappings
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("mappings.json")
}

/// Term oracle backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum OracleConfig {
    /// Deterministic oracle backed by a YAML glossary
    Glossary {
        #[serde(default = "default_glossary_path")]
        path: PathBuf,
    },
    /// OpenAI-compatible chat completions endpoint
    #[serde(rename = "openai", rename_all = "camelCase")]
    OpenAi {
        #[serde(default = "default_model")]
        model: String,
        #[serde(default = "default_base_url")]
        base_url: String,
        /// Name of the environment variable holding the API key
        #[serde(default = "default_api_key_env")]
        api_key_env: String,
        #[serde(default = "default_temperature")]
        temperature: f64,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
}

impl Default for OracleConfig {
    fn default() -> Self {
        OracleConfig::Glossary {
            path: default_glossary_path(),
        }
    }
}

impl OracleConfig {
    /// Short name for logs and errors
    pub fn kind(&self) -> &'static str {
        match self {
            OracleConfig::Glossary { .. } => "glossary",
            OracleConfig::OpenAi { .. } => "openai",
        }
    }
}

fn default_glossary_path() -> PathBuf {
    PathBuf::from("glossary.yaml")
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_temperature() -> f64 {
    0.3
}

fn default_timeout_secs() -> u64 {
    30
}

/// Attestation defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttestationConfig {
    #[serde(default = "default_distance_threshold")]
    pub distance_threshold: f64,
}

impl Default for AttestationConfig {
    fn default() -> Self {
        Self {
            distance_threshold: default_distance_threshold(),
        }
    }
}

fn default_distance_threshold() -> f64 {
    0.3
}
