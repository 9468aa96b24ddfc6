//! aligner init command

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use console::style;
use shared::{AlignerConfig, OracleConfig, DEFAULT_CONFIG_FILE};

use crate::GlobalArgs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OracleKind {
    Glossary,
    Openai,
}

#[derive(Debug, Args)]
pub struct InitCommand {
    /// Directory to initialize
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Term oracle to configure
    #[arg(long, value_enum, default_value = "glossary")]
    pub oracle: OracleKind,

    /// Overwrite an existing configuration
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    pub fn run(&self, globals: &GlobalArgs) -> anyhow::Result<()> {
        let config_path = self.directory.join(DEFAULT_CONFIG_FILE);
        if config_path.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                config_path.display()
            );
        }

        std::fs::create_dir_all(&self.directory)?;

        let config = AlignerConfig {
            oracle: match self.oracle {
                OracleKind::Glossary => OracleConfig::default(),
                OracleKind::Openai => serde_json::from_value(serde_json::json!({ "kind": "openai" }))?,
            },
            ..AlignerConfig::default()
        };
        config.write_to(&config_path)?;

        let mut written = vec![config_path];
        if let OracleConfig::Glossary { path } = &config.oracle {
            let glossary_path = self.directory.join(path);
            if !glossary_path.exists() {
                write_sample_glossary(&glossary_path)?;
                written.push(glossary_path);
            }
        }

        if globals.json {
            let files: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
            crate::output::print_json(&serde_json::json!({ "created": files }))?;
        } else {
            for path in &written {
                println!("  {} {}", style("created").green(), path.display());
            }
            println!("{} Aligner project initialized", style("✓").green());
        }
        Ok(())
    }
}

fn write_sample_glossary(path: &Path) -> anyhow::Result<()> {
    std::fs::write(
        path,
        r#"pairs:
  - source: medical-v1
    target: consumer-health
    terms:
      - term: hypertension
        translation: high blood pressure
        confidence: 0.95
      - term: myocardial infarction
        translation: heart attack
        confidence: 0.95
      - term: edema
        translation: swelling
        confidence: 0.85
"#,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aligner_adapter::GlossaryOracle;

    fn globals() -> GlobalArgs {
        GlobalArgs {
            config: PathBuf::from(DEFAULT_CONFIG_FILE),
            json: true,
        }
    }

    #[test]
    fn test_init_writes_config_and_glossary() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = InitCommand {
            directory: dir.path().to_path_buf(),
            oracle: OracleKind::Glossary,
            force: false,
        };
        cmd.run(&globals()).unwrap();

        let config = AlignerConfig::from_file(&dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();
        assert_eq!(config, AlignerConfig::default());

        let oracle = GlossaryOracle::from_file(&dir.path().join("glossary.yaml")).unwrap();
        assert_eq!(oracle.glossary().pairs.len(), 1);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let mut cmd = InitCommand {
            directory: dir.path().to_path_buf(),
            oracle: OracleKind::Glossary,
            force: false,
        };
        cmd.run(&globals()).unwrap();
        assert!(cmd.run(&globals()).is_err());

        cmd.force = true;
        cmd.oracle = OracleKind::Openai;
        cmd.run(&globals()).unwrap();
        let config = AlignerConfig::from_file(&dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();
        assert_eq!(config.oracle.kind(), "openai");
    }
}
