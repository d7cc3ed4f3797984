//! Configuration schema types
//!
//! This module defines the structure of `conduit.toml`. Every section and key is
//! optional; omitted values fall back to the defaults below.

use serde::{Deserialize, Serialize};

/// Accepted log levels
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Accepted log file rotation strategies
pub const LOG_ROTATIONS: [&str; 3] = ["daily", "hourly", "never"];

/// Main Conduit configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConduitConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Mapping and directory settings
    #[serde(default)]
    pub transform: TransformConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConduitConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.transform.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (transform but don't write outputs)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Mapping configuration and directory roots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Path to the JSON mapping configuration
    #[serde(default = "default_mapping_config")]
    pub mapping_config: String,

    /// Root holding `hl7/` and `xml/` input subdirectories
    #[serde(default = "default_input_dir")]
    pub input_dir: String,

    /// Root receiving `hl7_output/` and `xml_output/`
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl TransformConfig {
    fn validate(&self) -> Result<(), String> {
        if self.mapping_config.trim().is_empty() {
            return Err("transform.mapping_config cannot be empty".to_string());
        }
        if self.input_dir.trim().is_empty() {
            return Err("transform.input_dir cannot be empty".to_string());
        }
        if self.output_dir.trim().is_empty() {
            return Err("transform.output_dir cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            mapping_config: default_mapping_config(),
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if !LOG_ROTATIONS.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                LOG_ROTATIONS.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_mapping_config() -> String {
    "config/inbound_config.json".to_string()
}

fn default_input_dir() -> String {
    "data/input".to_string()
}

fn default_output_dir() -> String {
    "data/output".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
