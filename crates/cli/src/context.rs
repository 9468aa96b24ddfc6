//! Wiring from configuration to adapters

use std::path::{Path, PathBuf};

use aligner_adapter::{ConfiguredOracle, JsonFileMappingRepository};
use anyhow::Context;
use shared::AlignerConfig;
use tracing::debug;

/// Loaded configuration plus the mapping store it points at
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: AlignerConfig,
    pub repository: JsonFileMappingRepository,
}

impl AppContext {
    /// Load `config_path` (defaults if absent) and open the store.
    /// Relative paths resolve against the config file's directory.
    pub fn load(config_path: &Path) -> anyhow::Result<Self> {
        let config = AlignerConfig::load_or_default(config_path)
            .with_context(|| format!("Failed to load {}", config_path.display()))?
            .resolve_paths(&base_dir(config_path));

        let repository = JsonFileMappingRepository::open(&config.store.path)
            .with_context(|| format!("Failed to open mapping store {}", config.store.path.display()))?;

        debug!(
            store = %config.store.path.display(),
            oracle = config.oracle.kind(),
            "context loaded"
        );
        Ok(Self { config, repository })
    }

    /// Build the configured term oracle
    pub fn oracle(&self) -> anyhow::Result<ConfiguredOracle> {
        Ok(ConfiguredOracle::from_config(&self.config.oracle)?)
    }
}

fn base_dir(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
