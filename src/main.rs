// Conduit - HL7 v2 / XML Interface Transformer
// Copyright (c) 2025 Conduit Contributors
// Licensed under the MIT License

use clap::Parser;
use conduit::cli::commands::EXIT_FATAL;
use conduit::cli::{Cli, Commands};
use conduit::config::{load_config_or_default, LoggingConfig};
use conduit::logging::init_logging;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Commands re-load the configuration and report its errors themselves,
    // so a broken file only costs file logging here.
    let (config_level, logging_config) = match load_config_or_default(&cli.config) {
        Ok(config) => (config.application.log_level, config.logging),
        Err(_) => ("info".to_string(), LoggingConfig::default()),
    };
    let log_level = cli.log_level.clone().unwrap_or(config_level);

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_FATAL);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Conduit - HL7 v2 / XML Interface Transformer"
    );

    let exit_code = match execute_command(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    // process::exit skips destructors; flush the file writer first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Process(args) => args.execute(&cli.config),
        Commands::Convert(args) => args.execute(&cli.config),
        Commands::ValidateConfig(args) => args.execute(&cli.config),
    }
}
