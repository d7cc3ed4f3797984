//! Reading structured documents for the reverse direction
//!
//! Only the parts the reverse emitter consumes are modelled: the root
//! `timestamp` attribute and the `Patient` identity. Everything else in the
//! document is ignored. Repeated elements are accepted and the first one wins.

use crate::domain::{ConduitError, Result};
use serde::Deserialize;

/// Root element of a structured document
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct StructuredDocument {
    #[serde(rename = "@version", default)]
    pub version: Option<String>,

    #[serde(rename = "@timestamp", default)]
    pub timestamp: Option<String>,

    #[serde(rename = "@transformation_config", default)]
    pub transformation_config: Option<String>,

    #[serde(rename = "Patient", default)]
    pub patients: Vec<PatientIdentity>,
}

/// Patient identity carried back into a `PID` segment
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct PatientIdentity {
    #[serde(rename = "PatientId", default)]
    pub patient_ids: Vec<String>,

    #[serde(rename = "LastName", default)]
    pub last_names: Vec<String>,

    #[serde(rename = "FirstName", default)]
    pub first_names: Vec<String>,
}

impl PatientIdentity {
    pub fn patient_id(&self) -> Option<&str> {
        first_non_empty(&self.patient_ids)
    }

    /// `LAST^FIRST` when both names are present
    pub fn composed_name(&self) -> Option<String> {
        let last = first_non_empty(&self.last_names)?;
        let first = first_non_empty(&self.first_names)?;
        Some(format!("{last}^{first}"))
    }
}

impl StructuredDocument {
    /// Parses a document from XML text
    pub fn from_xml_str(xml: &str) -> Result<Self> {
        quick_xml::de::from_str(xml)
            .map_err(|e| ConduitError::Xml(format!("Failed to parse structured document: {e}")))
    }

    pub fn timestamp(&self) -> &str {
        self.timestamp
            .as_deref()
            .and_then(non_empty)
            .unwrap_or_default()
    }

    /// The first `Patient` element, if any
    pub fn patient(&self) -> Option<&PatientIdentity> {
        self.patients.first()
    }
}

fn first_non_empty(values: &[String]) -> Option<&str> {
    values.first().map(String::as_str).and_then(non_empty)
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value.trim()).filter(|v| !v.is_empty())
}
