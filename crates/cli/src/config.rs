//! Command-line and environment configuration.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use topics_core::Tenancy;
use topics_observability::LogFormat;

#[derive(Debug, Parser)]
#[command(name = "topics", version, about = "Users, movies and messages services")]
pub struct Cli {
    /// Log output format (json or pretty).
    #[arg(long, env = "TOPICS_LOG_FORMAT", default_value = "pretty")]
    pub log_format: LogFormat,

    /// Default tenancy for messages and demo data.
    #[arg(long, env = "TOPICS_TENANCY", default_value = "tenancy/default")]
    pub tenancy: String,

    /// Persist entities as JSON files in this directory instead of memory.
    #[arg(long, env = "TOPICS_STORE_DIR")]
    pub store_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Replay a demo flow against the configured store and print the results.
    Scenario {
        #[arg(value_enum, default_value_t = ScenarioKind::All)]
        kind: ScenarioKind,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenarioKind {
    Movies,
    Users,
    Messages,
    All,
}

/// Where repositories keep their records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    InMemory,
    JsonDir(PathBuf),
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_format: LogFormat,
    pub tenancy: Tenancy,
    pub store: StoreConfig,
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let tenancy = Tenancy::parse(cli.tenancy.clone())
            .map_err(|v| anyhow::anyhow!("invalid --tenancy: {v}"))?;

        let store = match &cli.store_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("creating store directory {}", dir.display()))?;
                StoreConfig::JsonDir(dir.clone())
            }
            None => StoreConfig::InMemory,
        };

        Ok(Self {
            log_format: cli.log_format,
            tenancy,
            store,
        })
    }

    pub fn in_memory(tenancy: Tenancy) -> Self {
        Self {
            log_format: LogFormat::default(),
            tenancy,
            store: StoreConfig::InMemory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_in_memory_store() {
        let cli = Cli::try_parse_from(["topics", "scenario"]).unwrap();
        let cfg = AppConfig::from_cli(&cli).unwrap();

        assert_eq!(cfg.store, StoreConfig::InMemory);
        assert_eq!(cfg.tenancy.as_str(), "tenancy/default");
        assert!(matches!(cli.command, Command::Scenario { kind: ScenarioKind::All }));
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "topics",
            "--log-format",
            "json",
            "--tenancy",
            "tenancy/acme",
            "scenario",
            "movies",
        ])
        .unwrap();

        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.tenancy, "tenancy/acme");
        assert!(matches!(cli.command, Command::Scenario { kind: ScenarioKind::Movies }));
    }

    #[test]
    fn blank_tenancy_is_rejected() {
        let cli = Cli::try_parse_from(["topics", "--tenancy", " ", "scenario"]).unwrap();
        assert!(AppConfig::from_cli(&cli).is_err());
    }
}
