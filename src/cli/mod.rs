//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Conduit using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Conduit - HL7 v2 / XML Interface Transformer
#[derive(Parser, Debug)]
#[command(name = "conduit")]
#[command(version, about, long_about = None)]
#[command(author = "Conduit Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "conduit.toml", env = "CONDUIT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CONDUIT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transform every file under the input directory
    Process(commands::process::ProcessArgs),

    /// Transform a single file
    Convert(commands::convert::ConvertArgs),

    /// Validate the tool and mapping configuration
    ValidateConfig(commands::validate::ValidateArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_process() {
        let cli = Cli::parse_from(["conduit", "process"]);
        assert_eq!(cli.config, "conduit.toml");
        assert!(matches!(cli.command, Commands::Process(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["conduit", "--config", "custom.toml", "process"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["conduit", "--log-level", "debug", "process"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_process_overrides() {
        let cli = Cli::parse_from([
            "conduit",
            "process",
            "--input",
            "in",
            "--output",
            "out",
            "--mapping",
            "map.json",
            "--dry-run",
        ]);
        let Commands::Process(args) = cli.command else {
            panic!("expected process command");
        };
        assert_eq!(args.input.as_deref(), Some("in"));
        assert_eq!(args.output.as_deref(), Some("out"));
        assert_eq!(args.mapping.as_deref(), Some("map.json"));
        assert!(args.dry_run);
    }

    #[test]
    fn test_cli_parse_convert() {
        let cli = Cli::parse_from(["conduit", "convert", "adt.hl7", "adt.xml"]);
        let Commands::Convert(args) = cli.command else {
            panic!("expected convert command");
        };
        assert_eq!(args.input.to_str(), Some("adt.hl7"));
        assert_eq!(args.output.to_str(), Some("adt.xml"));
        assert!(args.mapping.is_none());
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["conduit", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }
}
