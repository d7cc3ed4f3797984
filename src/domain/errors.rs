//! Domain error types
//!
//! This module defines the error hierarchy for Conduit. Expected misses (a field
//! reference that does not resolve, a date that does not parse) are not errors and
//! never appear here; they surface as `None` or as the raw value.

use std::path::Path;
use thiserror::Error;

/// Main Conduit error type
///
/// This is the primary error type used throughout the library.
#[derive(Debug, Error)]
pub enum ConduitError {
    /// Missing, unreadable or malformed configuration source
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Mapping tree that parsed as JSON but cannot be compiled into sections
    #[error("Mapping error: {0}")]
    Mapping(String),

    /// Failure while transforming a single file
    #[error("Transformation error: {0}")]
    Transformation(String),

    /// XML reading or writing errors
    #[error("XML error: {0}")]
    Xml(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl ConduitError {
    /// Wraps an error raised while transforming `input` into a per-file failure
    pub fn transform_failed(input: &Path, err: impl std::fmt::Display) -> Self {
        ConduitError::Transformation(format!("Failed to transform {}: {err}", input.display()))
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for ConduitError {
    fn from(err: std::io::Error) -> Self {
        ConduitError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ConduitError {
    fn from(err: serde_json::Error) -> Self {
        ConduitError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ConduitError {
    fn from(err: toml::de::Error) -> Self {
        ConduitError::Configuration(format!("TOML parse error: {err}"))
    }
}
