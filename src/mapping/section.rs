//! Mapping sections
//!
//! Each top-level entry of `mappings` is classified once, at load time, into a
//! [`SectionKind`]. Classification follows a fixed priority:
//!
//! 1. by name: `message_header`, `patient`, `visit`, `custom_segments`
//! 2. by shape: a section whose `source` is `OBX` becomes a filtered array
//! 3. by name: `allergies`, `diagnoses`
//!
//! Anything else is skipped.

use super::field::{is_leaf, ArrayField, FieldConfig};
use crate::domain::{ConduitError, Result};
use serde_json::{Map, Value};

/// Segment type that carries discriminator-filtered observations
pub const OBSERVATION_SEGMENT: &str = "OBX";

/// A named leaf mapping
#[derive(Debug, Clone, PartialEq)]
pub struct NamedField {
    pub name: String,
    pub config: FieldConfig,
}

/// Entry of an object section: a leaf or one level of nesting
#[derive(Debug, Clone, PartialEq)]
pub enum FieldNode {
    Leaf(NamedField),
    Nested {
        name: String,
        fields: Vec<NamedField>,
    },
}

/// A named sub-group of a custom-segment family
#[derive(Debug, Clone, PartialEq)]
pub struct FieldGroup {
    pub name: String,
    pub fields: Vec<NamedField>,
}

/// Output strategy selected for a section
#[derive(Debug, Clone, PartialEq)]
pub enum SectionKind {
    /// Flat key→field map, emitted as `MessageHeader`
    HeaderSection(Vec<NamedField>),
    /// Flat or one-level nested map, emitted as `Patient`
    PatientSection(Vec<FieldNode>),
    /// Flat or one-level nested map, emitted as `Visit`
    VisitSection(Vec<FieldNode>),
    /// Two-level map of sub-groups, emitted as `CustomSegments`
    CustomGroup(Vec<FieldGroup>),
    /// `OBX` segments gated by an observation-id allow-list
    FilteredArray {
        fields: Vec<ArrayField>,
        observation_ids: Vec<String>,
    },
    /// One item per segment of `source`
    PlainArray {
        source: Option<String>,
        fields: Vec<ArrayField>,
    },
}

/// A classified top-level mapping section
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub name: String,
    pub kind: SectionKind,
}

impl Section {
    /// Classifies one section, returning `None` for sections no strategy handles
    pub fn compile(name: &str, value: &Value) -> Result<Option<Self>> {
        let kind = match name {
            "message_header" => Some(SectionKind::HeaderSection(compile_flat(
                name,
                as_object(name, value)?,
            )?)),
            "patient" => Some(SectionKind::PatientSection(compile_object(
                name,
                as_object(name, value)?,
            )?)),
            "visit" => Some(SectionKind::VisitSection(compile_object(
                name,
                as_object(name, value)?,
            )?)),
            "custom_segments" => Some(SectionKind::CustomGroup(compile_groups(
                name,
                as_object(name, value)?,
            )?)),
            _ if source_of(value) == Some(OBSERVATION_SEGMENT) => {
                Some(SectionKind::FilteredArray {
                    fields: compile_array_fields(value)?,
                    observation_ids: observation_ids(name, value)?,
                })
            }
            "allergies" | "diagnoses" => {
                as_object(name, value)?;
                Some(SectionKind::PlainArray {
                    source: source_of(value).map(str::to_string),
                    fields: compile_array_fields(value)?,
                })
            }
            _ => None,
        };

        Ok(kind.map(|kind| Self {
            name: name.to_string(),
            kind,
        }))
    }

    /// Short label for logging
    pub fn strategy(&self) -> &'static str {
        match self.kind {
            SectionKind::HeaderSection(_) => "header",
            SectionKind::PatientSection(_) => "patient",
            SectionKind::VisitSection(_) => "visit",
            SectionKind::CustomGroup(_) => "custom_group",
            SectionKind::FilteredArray { .. } => "filtered_array",
            SectionKind::PlainArray { .. } => "array",
        }
    }
}

fn as_object<'v>(name: &str, value: &'v Value) -> Result<&'v Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        ConduitError::Mapping(format!("Mapping section '{name}' must be an object"))
    })
}

fn source_of(value: &Value) -> Option<&str> {
    value.get("source").and_then(Value::as_str)
}

fn compile_flat(section: &str, entries: &Map<String, Value>) -> Result<Vec<NamedField>> {
    entries
        .iter()
        .map(|(key, value)| {
            as_object(&format!("{section}.{key}"), value)?;
            Ok(NamedField {
                name: key.clone(),
                config: FieldConfig::from_value(key, value)?,
            })
        })
        .collect()
}

fn compile_object(section: &str, entries: &Map<String, Value>) -> Result<Vec<FieldNode>> {
    let mut nodes = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let path = format!("{section}.{key}");
        let object = as_object(&path, value)?;
        if is_leaf(value) {
            nodes.push(FieldNode::Leaf(NamedField {
                name: key.clone(),
                config: FieldConfig::from_value(key, value)?,
            }));
            continue;
        }

        // Nesting is exactly one level; inner entries without a source are dropped.
        let mut fields = Vec::new();
        for (nested_key, nested_value) in object {
            if nested_value.is_object() && is_leaf(nested_value) {
                fields.push(NamedField {
                    name: nested_key.clone(),
                    config: FieldConfig::from_value(nested_key, nested_value)?,
                });
            }
        }
        nodes.push(FieldNode::Nested {
            name: key.clone(),
            fields,
        });
    }
    Ok(nodes)
}

fn compile_groups(section: &str, entries: &Map<String, Value>) -> Result<Vec<FieldGroup>> {
    entries
        .iter()
        .map(|(group, value)| {
            let path = format!("{section}.{group}");
            Ok(FieldGroup {
                name: group.clone(),
                fields: compile_flat(&path, as_object(&path, value)?)?,
            })
        })
        .collect()
}

fn compile_array_fields(value: &Value) -> Result<Vec<ArrayField>> {
    let Some(fields) = value.get("fields").and_then(Value::as_object) else {
        return Ok(Vec::new());
    };
    let mut compiled = Vec::with_capacity(fields.len());
    for (key, field) in fields {
        if let Some(field) = ArrayField::from_value(key, field)? {
            compiled.push(field);
        }
    }
    Ok(compiled)
}

fn observation_ids(name: &str, value: &Value) -> Result<Vec<String>> {
    let Some(ids) = value.get("filter").and_then(|f| f.get("observation_id")) else {
        return Ok(Vec::new());
    };
    let ids = ids.as_array().ok_or_else(|| {
        ConduitError::Mapping(format!(
            "Section '{name}': filter.observation_id must be a list of strings"
        ))
    })?;
    ids.iter()
        .map(|id| {
            id.as_str().map(str::to_string).ok_or_else(|| {
                ConduitError::Mapping(format!(
                    "Section '{name}': observation ids must be strings, got {id}"
                ))
            })
        })
        .collect()
}
