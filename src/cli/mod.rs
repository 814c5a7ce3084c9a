//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the lead router using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Lead Router - lead routing and batch export tool
#[derive(Parser, Debug)]
#[command(name = "lead-router")]
#[command(version, about, long_about = None)]
#[command(author = "Lead Router Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "lead-router.toml", env = "LEAD_ROUTER_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "LEAD_ROUTER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Route pending leads and append them to their owners' sheets
    Export(commands::export::ExportArgs),

    /// Validate configuration file and routing tables
    ValidateConfig(commands::validate::ValidateArgs),

    /// Show source status counts and destination sheet sizes
    Status(commands::status::StatusArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Commands {
    /// Subcommand name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Export(_) => "export",
            Commands::ValidateConfig(_) => "validate-config",
            Commands::Status(_) => "status",
            Commands::Init(_) => "init",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["lead-router", "export"]);
        assert_eq!(cli.config, "lead-router.toml");
        assert!(matches!(cli.command, Commands::Export(_)));
    }

    #[test]
    fn test_command_names_match_subcommands() {
        for name in ["export", "validate-config", "status", "init"] {
            let cli = Cli::parse_from(["lead-router", name]);
            assert_eq!(cli.command.name(), name);
        }
    }

    #[test]
    fn test_cli_parse_export_flags() {
        let cli = Cli::parse_from(["lead-router", "export", "--dry-run", "--batch-size", "25"]);
        match cli.command {
            Commands::Export(args) => {
                assert!(args.dry_run);
                assert_eq!(args.batch_size, Some(25));
                assert!(!args.yes);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["lead-router", "--config", "custom.toml", "export"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["lead-router", "--log-level", "debug", "export"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["lead-router", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_status() {
        let cli = Cli::parse_from(["lead-router", "status"]);
        assert!(matches!(cli.command, Commands::Status(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["lead-router", "init", "--output", "out.toml", "--force"]);
        match cli.command {
            Commands::Init(args) => {
                assert_eq!(args.output, "out.toml");
                assert!(args.force);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
