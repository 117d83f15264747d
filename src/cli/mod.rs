//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for DK Bridge using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// DK Bridge - Decision Key to Unify report migration tool
#[derive(Parser, Debug)]
#[command(name = "dkbridge")]
#[command(version, about, long_about = None)]
#[command(author = "DK Bridge Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "dkbridge.toml", env = "DKBRIDGE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "DKBRIDGE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Migrate a DK report to Unify
    Migrate(commands::migrate::MigrateArgs),

    /// Validate configuration file and hierarchy catalog
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_migrate() {
        let cli = Cli::parse_from(["dkbridge", "migrate"]);
        assert_eq!(cli.config, "dkbridge.toml");
        match cli.command {
            Commands::Migrate(args) => {
                assert!(args.report.is_none());
                assert!(!args.dry_run);
            }
            other => panic!("Expected migrate, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_migrate_flags() {
        let cli = Cli::parse_from([
            "dkbridge",
            "migrate",
            "--report",
            "Coffee Sales",
            "--dry-run",
            "--output",
            "definition.json",
        ]);
        match cli.command {
            Commands::Migrate(args) => {
                assert_eq!(args.report.as_deref(), Some("Coffee Sales"));
                assert!(args.dry_run);
                assert_eq!(args.output.as_deref(), Some("definition.json"));
            }
            other => panic!("Expected migrate, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["dkbridge", "--config", "custom.toml", "migrate"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["dkbridge", "--log-level", "debug", "migrate"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["dkbridge", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["dkbridge", "init", "--force"]);
        match cli.command {
            Commands::Init(args) => {
                assert!(args.force);
                assert_eq!(args.output, "dkbridge.toml");
            }
            other => panic!("Expected init, got {other:?}"),
        }
    }
}
