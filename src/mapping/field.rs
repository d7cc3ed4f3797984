//! Leaf field mappings
//!
//! A field config is the leaf of the mapping tree:
//! `{"source": "PID.8", "type": "date", "format": "YYYYMMDD", "required": true}`.

use crate::domain::{ConduitError, Result};
use crate::hl7::{coerce, FieldReference, FieldType, Message, Segment};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct RawFieldConfig {
    #[serde(default)]
    source: Option<String>,
    #[serde(rename = "type", default)]
    field_type: FieldType,
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    required: bool,
}

/// Compiled leaf mapping used by the object and custom-group strategies
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// `None` when the config has no source or the source has fewer than two parts
    pub source: Option<FieldReference>,
    pub field_type: FieldType,
    pub format: Option<String>,
    pub required: bool,
}

impl FieldConfig {
    /// Compiles a leaf from its JSON value
    pub fn from_value(key: &str, value: &Value) -> Result<Self> {
        let raw: RawFieldConfig = serde_json::from_value(value.clone()).map_err(|e| {
            ConduitError::Mapping(format!("Invalid field mapping '{key}': {e}"))
        })?;
        let source = match raw.source.as_deref() {
            Some(reference) => FieldReference::parse(reference)?,
            None => None,
        };
        Ok(Self {
            source,
            field_type: raw.field_type,
            format: raw.format,
            required: raw.required,
        })
    }

    /// Resolves against the message root and applies type coercion
    pub fn extract(&self, message: &Message) -> Option<String> {
        let raw = self.source.as_ref()?.resolve(message);
        coerce(raw, &self.field_type, self.format.as_deref())
    }
}

/// Per-segment field used by the array and filtered strategies
///
/// Values are taken verbatim from the iterated segment; no coercion and no
/// `required` handling applies on this path.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayField {
    pub name: String,
    pub source: FieldReference,
}

impl ArrayField {
    /// Compiles an array field, returning `None` for entries that can never resolve
    pub fn from_value(key: &str, value: &Value) -> Result<Option<Self>> {
        let Some(reference) = value.get("source").and_then(Value::as_str) else {
            return Ok(None);
        };
        Ok(FieldReference::parse(reference)?.map(|source| Self {
            name: key.to_string(),
            source,
        }))
    }

    pub fn extract<'s>(&self, segment: &'s Segment) -> Option<&'s str> {
        self.source.resolve_in(segment)
    }
}

/// True when a mapping entry declares a `source` key, i.e. is a leaf
pub fn is_leaf(value: &Value) -> bool {
    value.get("source").is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PID: &str = "PID|1||123456789^^^UCDMC^MR||DOE^JANE^MARIE^||19850315|F";

    #[test]
    fn test_field_config_defaults() {
        let config = FieldConfig::from_value("last_name", &json!({"source": "PID.6.1"})).unwrap();
        assert_eq!(config.source.unwrap().to_string(), "PID.6.1");
        assert_eq!(config.field_type, FieldType::String);
        assert!(config.format.is_none());
        assert!(!config.required);
    }

    #[test]
    fn test_field_config_extract_with_date() {
        let message = Message::parse(PID);
        let config = FieldConfig::from_value(
            "date_of_birth",
            &json!({"source": "PID.8", "type": "date", "format": "YYYYMMDD"}),
        )
        .unwrap();
        assert_eq!(config.extract(&message), Some("1985-03-15".to_string()));
    }

    #[test]
    fn test_field_config_missing_source_is_absent() {
        let message = Message::parse(PID);
        let config = FieldConfig::from_value("x", &json!({"required": true})).unwrap();
        assert!(config.source.is_none());
        assert!(config.required);
        assert_eq!(config.extract(&message), None);
    }

    #[test]
    fn test_field_config_rejects_non_numeric_index() {
        let result = FieldConfig::from_value("x", &json!({"source": "PID.six"}));
        assert!(matches!(result, Err(ConduitError::Mapping(_))));
    }

    #[test]
    fn test_field_config_rejects_wrong_shape() {
        let result = FieldConfig::from_value("x", &json!({"source": 5}));
        assert!(matches!(result, Err(ConduitError::Mapping(_))));
    }

    #[test]
    fn test_array_field_skips_unresolvable_entries() {
        assert!(ArrayField::from_value("a", &json!({"type": "string"}))
            .unwrap()
            .is_none());
        assert!(ArrayField::from_value("a", &json!({"source": "AL1"}))
            .unwrap()
            .is_none());
        let field = ArrayField::from_value("allergen", &json!({"source": "AL1.4.2"}))
            .unwrap()
            .unwrap();
        assert_eq!(field.name, "allergen");
    }
}
