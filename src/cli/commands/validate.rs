//! Validate config command implementation
//!
//! This module implements the `validate-config` command, which checks both
//! `conduit.toml` and the mapping configuration it points at.

use super::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};
use crate::config::load_config_or_default;
use crate::mapping::load_mapping_config;
use clap::Args;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Mapping configuration (overrides transform.mapping_config)
    #[arg(short, long)]
    pub mapping: Option<String>,

    /// Print the effective tool configuration as TOML
    #[arg(long)]
    pub show: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        if !Path::new(config_path).exists() {
            println!("   (not found, using defaults)");
        }
        println!();

        let config = match load_config_or_default(config_path) {
            Ok(c) => {
                println!("✅ Tool configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Failed to load tool configuration");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        if self.show {
            println!();
            println!("{}", toml::to_string_pretty(&config)?);
        }

        let mapping_path = self
            .mapping
            .as_deref()
            .unwrap_or(&config.transform.mapping_config);
        let mapping = match load_mapping_config(mapping_path) {
            Ok(m) => m,
            Err(e) => {
                println!("❌ Failed to load mapping configuration {mapping_path}");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        if let Err(e) = mapping.validate() {
            println!("❌ Mapping configuration validation failed");
            println!("   Error: {e}");
            return Ok(EXIT_CONFIG_ERROR);
        }

        println!("✅ Mapping configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Input Directory: {}", config.transform.input_dir);
        println!("  Output Directory: {}", config.transform.output_dir);
        println!("  Mapping: {mapping_path}");
        println!("  Config Name: {}", mapping.config_name());
        println!(
            "  Formats: {} → {}",
            mapping.input_format, mapping.output_format
        );
        if let Some(message_type) = &mapping.message_type {
            println!("  Message Type: {message_type}");
        }
        println!("  Sections:");
        for section in &mapping.sections {
            println!("    - {} ({})", section.name, section.strategy());
        }
        if !mapping.skipped_sections.is_empty() {
            println!("  Ignored Sections: {}", mapping.skipped_sections.join(", "));
        }
        println!();

        Ok(EXIT_SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_mapping_is_config_error() {
        let args = ValidateArgs {
            mapping: Some("does/not/exist.json".to_string()),
            show: false,
        };
        assert_eq!(args.execute("does/not/exist.toml").unwrap(), EXIT_CONFIG_ERROR);
    }

    #[test]
    fn test_valid_mapping() {
        let mut mapping = NamedTempFile::new().unwrap();
        mapping
            .write_all(br#"{"mappings": {"patient": {"patient_id": {"source": "PID.4.1"}}}}"#)
            .unwrap();
        mapping.flush().unwrap();

        let args = ValidateArgs {
            mapping: Some(mapping.path().to_string_lossy().into_owned()),
            show: true,
        };
        assert_eq!(args.execute("does/not/exist.toml").unwrap(), EXIT_SUCCESS);
    }

    #[test]
    fn test_unsupported_direction_is_config_error() {
        let mut mapping = NamedTempFile::new().unwrap();
        mapping
            .write_all(br#"{"input_format": "xml", "output_format": "xml"}"#)
            .unwrap();
        mapping.flush().unwrap();

        let args = ValidateArgs {
            mapping: Some(mapping.path().to_string_lossy().into_owned()),
            show: false,
        };
        assert_eq!(args.execute("does/not/exist.toml").unwrap(), EXIT_CONFIG_ERROR);
    }
}
