//! Transformation engine
//!
//! A [`Transformer`] is built from an already loaded [`TransformationConfig`]
//! and converts in the direction the configuration declares:
//!
//! - **hl7 → xml**: mapping driven, see [`forward`]
//! - **xml → hl7**: fixed header and patient identity, see [`reverse`]
//!
//! Transforming the same input twice with the same configuration yields identical
//! output except for the root `timestamp` attribute.

pub mod forward;
pub mod reverse;

use crate::domain::{ConduitError, Direction, Result};
use crate::hl7::{self, validate_message, Message};
use crate::mapping::{load_mapping_config, TransformationConfig};
use crate::xml::{StructuredDocument, XmlElement};
use chrono::Local;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Name of the document root element
pub const ROOT_ELEMENT: &str = "HealthcareMessage";

/// Value of the root `version` attribute
pub const DOCUMENT_VERSION: &str = "1.0";

/// Local ISO-8601 layout of the root `timestamp` attribute
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Converts `snake_case` mapping keys into `CamelCase` element names
///
/// # Examples
///
/// ```
/// use conduit::core::transform::camel_case;
///
/// assert_eq!(camel_case("patient_id"), "PatientId");
/// assert_eq!(camel_case("HL7_version"), "Hl7Version");
/// ```
pub fn camel_case(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect()
}

/// Bidirectional transformer driven by one mapping configuration
#[derive(Debug, Clone)]
pub struct Transformer {
    config: TransformationConfig,
}

impl Transformer {
    pub fn new(config: TransformationConfig) -> Self {
        Self { config }
    }

    /// Loads the mapping configuration at `path` and builds a transformer from it
    pub fn from_mapping_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(load_mapping_config(path)?))
    }

    pub fn config(&self) -> &TransformationConfig {
        &self.config
    }

    /// Direction declared by the configuration
    ///
    /// # Errors
    ///
    /// Returns [`ConduitError::Transformation`] for any pair other than hl7→xml
    /// or xml→hl7.
    pub fn direction(&self) -> Result<Direction> {
        self.config.direction().ok_or_else(|| {
            ConduitError::Transformation(format!(
                "Unsupported transformation: {} to {}",
                self.config.input_format, self.config.output_format
            ))
        })
    }

    /// Builds the structured document for `message`, stamped with the current time
    pub fn transform(&self, message: &Message) -> XmlElement {
        let timestamp = Local::now().naive_local().format(TIMESTAMP_FORMAT).to_string();
        self.transform_with_timestamp(message, &timestamp)
    }

    /// Builds the structured document for `message` with an explicit timestamp
    pub fn transform_with_timestamp(&self, message: &Message, timestamp: &str) -> XmlElement {
        let mut root = XmlElement::new(ROOT_ELEMENT);
        root.set_attribute("version", DOCUMENT_VERSION);
        root.set_attribute("timestamp", timestamp);
        root.set_attribute("transformation_config", self.config.config_name());

        for section in &self.config.sections {
            debug!(section = %section.name, strategy = section.strategy(), "Rendering section");
            forward::render_section(&mut root, section, message);
        }
        root
    }

    /// Builds and serializes the structured document for `message`
    pub fn transform_to_xml_string(&self, message: &Message) -> Result<String> {
        self.transform(message).to_pretty_string()
    }

    /// Renders a structured document as wire text
    pub fn transform_xml_to_hl7(&self, xml: &str) -> Result<String> {
        let document = StructuredDocument::from_xml_str(xml)?;
        Ok(reverse::render_message(&document, Local::now().naive_local()))
    }

    /// Reads `input` and returns the transformed text without writing anything
    ///
    /// Validation findings on wire input are logged as warnings; they never
    /// prevent output.
    pub fn render_file(&self, input: &Path) -> Result<String> {
        self.render_file_inner(input)
            .map_err(|e| ConduitError::transform_failed(input, e))
    }

    /// Transforms `input` and writes the result to `output`
    ///
    /// # Errors
    ///
    /// Any failure, including an unsupported direction, is returned as
    /// [`ConduitError::Transformation`] naming the input path.
    pub fn transform_file(&self, input: &Path, output: &Path) -> Result<()> {
        crate::log_transform_start!(input.display(), output.display());

        let rendered = self.render_file(input)?;
        write_output(output, &rendered).map_err(|e| ConduitError::transform_failed(input, e))?;

        crate::log_transform_complete!(input.display(), output.display(), rendered.len());
        Ok(())
    }

    fn render_file_inner(&self, input: &Path) -> Result<String> {
        match self.direction()? {
            Direction::Hl7ToXml => {
                let message = hl7::parse_file(input)?;
                let warnings = validate_message(&message);
                if !warnings.is_empty() {
                    warn!(
                        input = %input.display(),
                        warnings = %warnings.join(", "),
                        "Validation warnings"
                    );
                }
                self.transform_to_xml_string(&message)
            }
            Direction::XmlToHl7 => {
                let xml = fs::read_to_string(input)?;
                self.transform_xml_to_hl7(&xml)
            }
        }
    }
}

fn write_output(output: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use test_case::test_case;

    const ADT: &str = "MSH|^~\\&|EPIC|UCDMC|CERNER|UCDMC|202312151430||ADT^A01^ADT_A01|12345|P|2.5\n\
                       PID|1||123456789^^^UCDMC^MR||DOE^JANE^MARIE^||19850315|F";

    fn transformer(json: &str) -> Transformer {
        Transformer::new(TransformationConfig::from_json_str(json).unwrap())
    }

    #[test_case("patient_id" => "PatientId" ; "two words")]
    #[test_case("date_of_birth" => "DateOfBirth" ; "three words")]
    #[test_case("MRN" => "Mrn" ; "uppercase word")]
    #[test_case("visit" => "Visit" ; "single word")]
    #[test_case("a__b" => "AB" ; "empty word")]
    fn test_camel_case(key: &str) -> String {
        camel_case(key)
    }

    #[test]
    fn test_root_attributes() {
        let transformer = transformer(r#"{"config_name": "meditech_inbound", "mappings": {}}"#);
        let root = transformer.transform_with_timestamp(&Message::parse(ADT), "2024-01-15T10:30:00");

        assert_eq!(root.name(), "HealthcareMessage");
        assert_eq!(root.attribute("version"), Some("1.0"));
        assert_eq!(root.attribute("timestamp"), Some("2024-01-15T10:30:00"));
        assert_eq!(root.attribute("transformation_config"), Some("meditech_inbound"));
        assert!(root.children().is_empty());
    }

    #[test]
    fn test_default_config_name() {
        let transformer = transformer("{}");
        let root = transformer.transform(&Message::parse(ADT));
        assert_eq!(root.attribute("transformation_config"), Some("default"));
        assert!(root.attribute("timestamp").is_some());
    }

    #[test]
    fn test_sections_in_document_order() {
        let transformer = transformer(
            r#"{"mappings": {
                "visit": {},
                "insurance": {"source": "IN1"},
                "patient": {"patient_id": {"source": "PID.4.1"}}
            }}"#,
        );
        let root = transformer.transform(&Message::parse(ADT));
        let names: Vec<&str> = root.children().iter().map(XmlElement::name).collect();
        assert_eq!(names, ["Visit", "Patient"]);
    }

    #[test]
    fn test_unsupported_direction() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("in.hl7");
        fs::write(&input, ADT).unwrap();

        let transformer = transformer(r#"{"input_format": "hl7", "output_format": "json"}"#);
        let err = transformer
            .transform_file(&input, &temp.path().join("out.json"))
            .unwrap_err();
        assert!(matches!(err, ConduitError::Transformation(_)));
        let message = err.to_string();
        assert!(message.contains("Failed to transform"));
        assert!(message.contains("Unsupported transformation: hl7 to json"));
    }

    #[test]
    fn test_transform_file_writes_xml() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("adt.hl7");
        let output = temp.path().join("out").join("adt.xml");
        fs::write(&input, ADT).unwrap();

        let transformer =
            transformer(r#"{"mappings": {"patient": {"last_name": {"source": "PID.6.1"}}}}"#);
        transformer.transform_file(&input, &output).unwrap();

        let xml = fs::read_to_string(&output).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<LastName>DOE</LastName>"));
    }

    #[test]
    fn test_missing_input_is_transformation_error() {
        let temp = TempDir::new().unwrap();
        let transformer = transformer("{}");
        let err = transformer
            .transform_file(&temp.path().join("missing.hl7"), &temp.path().join("out.xml"))
            .unwrap_err();
        assert!(matches!(err, ConduitError::Transformation(_)));
        assert!(!temp.path().join("out.xml").exists());
    }

    #[test]
    fn test_reverse_direction() {
        let transformer = transformer(r#"{"input_format": "xml", "output_format": "hl7"}"#);
        let hl7 = transformer
            .transform_xml_to_hl7(
                r#"<HealthcareMessage timestamp="t"><Patient><PatientId>42</PatientId></Patient></HealthcareMessage>"#,
            )
            .unwrap();
        let lines: Vec<&str> = hl7.split('\n').collect();
        assert!(lines[0].starts_with("MSH|^~\\&|DEMO|SYSTEM|TARGET|SYSTEM|"));
        assert_eq!(lines[1], "PID|1||42||");
    }
}
