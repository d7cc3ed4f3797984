//! Mapping configuration loader
//!
//! Reads JSON mapping files from disk and compiles them into a
//! [`TransformationConfig`].

use super::schema::TransformationConfig;
use crate::domain::{ConduitError, Result};
use std::fs;
use std::path::Path;

/// Loads a mapping configuration from a JSON file
///
/// # Errors
///
/// Returns [`ConduitError::Configuration`] if the file is missing, unreadable or
/// not valid JSON, and [`ConduitError::Mapping`] if the mapping tree cannot be
/// compiled.
///
/// # Examples
///
/// ```no_run
/// use conduit::mapping::load_mapping_config;
///
/// let config = load_mapping_config("config/inbound_config.json").expect("Failed to load mapping");
/// println!("{} sections", config.sections.len());
/// ```
pub fn load_mapping_config(path: impl AsRef<Path>) -> Result<TransformationConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConduitError::Configuration(format!(
            "Mapping configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ConduitError::Configuration(format!(
            "Failed to read mapping configuration {}: {}",
            path.display(),
            e
        ))
    })?;

    let config = TransformationConfig::from_json_str(&contents)?;

    tracing::info!(
        path = %path.display(),
        config_name = %config.config_name(),
        input_format = %config.input_format,
        output_format = %config.output_format,
        sections = config.sections.len(),
        skipped = config.skipped_sections.len(),
        "Loaded mapping configuration"
    );

    Ok(config)
}
