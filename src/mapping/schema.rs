//! Transformation configuration schema
//!
//! The document-level mapping configuration: format tags, a display name and the
//! compiled section list. Immutable once loaded and safe to share across threads.

use super::section::Section;
use crate::domain::{ConduitError, Direction, Result};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Name reported when a configuration does not declare `config_name`
pub const DEFAULT_CONFIG_NAME: &str = "default";

#[derive(Debug, Deserialize)]
struct RawTransformationConfig {
    #[serde(default = "default_input_format")]
    input_format: String,
    #[serde(default = "default_output_format")]
    output_format: String,
    #[serde(default)]
    config_name: Option<String>,
    #[serde(default)]
    message_type: Option<String>,
    #[serde(default)]
    mappings: Map<String, Value>,
}

/// Loaded mapping configuration
#[derive(Debug, Clone, PartialEq)]
pub struct TransformationConfig {
    /// Input format tag as declared (`hl7` or `xml`)
    pub input_format: String,

    /// Output format tag as declared (`xml` or `hl7`)
    pub output_format: String,

    /// Label written to the `transformation_config` attribute
    pub config_name: Option<String>,

    /// Informational message type, e.g. `ADT^A01`
    pub message_type: Option<String>,

    /// Sections in document order; unrecognized sections are already dropped
    pub sections: Vec<Section>,

    /// Names of sections that no strategy handles
    pub skipped_sections: Vec<String>,
}

impl TransformationConfig {
    /// Parses and compiles a configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| {
            ConduitError::Configuration(format!("Invalid JSON in mapping configuration: {e}"))
        })?;
        Self::from_value(value)
    }

    /// Compiles a configuration from an already parsed JSON tree
    pub fn from_value(value: Value) -> Result<Self> {
        let raw: RawTransformationConfig = serde_json::from_value(value).map_err(|e| {
            ConduitError::Configuration(format!("Invalid mapping configuration: {e}"))
        })?;

        let mut sections = Vec::new();
        let mut skipped_sections = Vec::new();
        for (name, section) in &raw.mappings {
            match Section::compile(name, section)? {
                Some(section) => {
                    tracing::debug!(
                        section = %section.name,
                        strategy = section.strategy(),
                        "Compiled mapping section"
                    );
                    sections.push(section);
                }
                None => {
                    tracing::debug!(section = %name, "Skipping unrecognized mapping section");
                    skipped_sections.push(name.clone());
                }
            }
        }

        Ok(Self {
            input_format: raw.input_format,
            output_format: raw.output_format,
            config_name: raw.config_name,
            message_type: raw.message_type,
            sections,
            skipped_sections,
        })
    }

    /// Display name, falling back to `default`
    pub fn config_name(&self) -> &str {
        self.config_name.as_deref().unwrap_or(DEFAULT_CONFIG_NAME)
    }

    /// Direction implied by the format tags, if supported
    pub fn direction(&self) -> Option<Direction> {
        Direction::from_tags(&self.input_format, &self.output_format)
    }

    /// Checks that the declared format pair is one a transformer can run
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.direction().is_none() {
            return Err(format!(
                "Unsupported transformation: {} to {}",
                self.input_format, self.output_format
            ));
        }
        Ok(())
    }
}

fn default_input_format() -> String {
    "hl7".to_string()
}

fn default_output_format() -> String {
    "xml".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TransformationConfig::from_json_str("{}").unwrap();
        assert_eq!(config.input_format, "hl7");
        assert_eq!(config.output_format, "xml");
        assert_eq!(config.config_name(), "default");
        assert!(config.sections.is_empty());
        assert_eq!(config.direction(), Some(Direction::Hl7ToXml));
    }

    #[test]
    fn test_sections_keep_document_order() {
        let config = TransformationConfig::from_json_str(
            r#"{
                "config_name": "meditech_inbound",
                "mappings": {
                    "patient": {"patient_id": {"source": "PID.4.1"}},
                    "insurance": {"source": "IN1"},
                    "message_header": {"control_id": {"source": "MSH.10"}},
                    "allergies": {"source": "AL1", "fields": {}}
                }
            }"#,
        )
        .unwrap();

        let names: Vec<&str> = config.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["patient", "message_header", "allergies"]);
        assert_eq!(config.skipped_sections, ["insurance"]);
        assert_eq!(config.config_name(), "meditech_inbound");
    }

    #[test]
    fn test_invalid_json_is_configuration_error() {
        let result = TransformationConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(ConduitError::Configuration(_))));
    }

    #[test]
    fn test_non_numeric_index_is_mapping_error() {
        let result = TransformationConfig::from_json_str(
            r#"{"mappings": {"patient": {"patient_id": {"source": "PID.four"}}}}"#,
        );
        assert!(matches!(result, Err(ConduitError::Mapping(_))));
    }

    #[test]
    fn test_validate_direction() {
        let config =
            TransformationConfig::from_json_str(r#"{"input_format": "xml", "output_format": "hl7"}"#)
                .unwrap();
        assert!(config.validate().is_ok());

        let config =
            TransformationConfig::from_json_str(r#"{"input_format": "hl7", "output_format": "json"}"#)
                .unwrap();
        assert_eq!(
            config.validate().unwrap_err(),
            "Unsupported transformation: hl7 to json"
        );
    }
}
