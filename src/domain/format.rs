//! Interchange format tags and transformation direction

use crate::domain::{ConduitError, Result};
use std::fmt;
use std::str::FromStr;

/// Format tag declared by a mapping configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatTag {
    /// Pipe-delimited HL7 v2 wire format
    Hl7,
    /// Structured XML document
    Xml,
}

impl FromStr for FormatTag {
    type Err = ConduitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "hl7" => Ok(Self::Hl7),
            "xml" => Ok(Self::Xml),
            _ => Err(ConduitError::Configuration(format!(
                "Invalid format tag: {s}. Expected 'hl7' or 'xml'"
            ))),
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hl7 => write!(f, "hl7"),
            Self::Xml => write!(f, "xml"),
        }
    }
}

/// Direction a transformer runs in, derived from the input/output tag pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// HL7 wire text in, XML document out
    Hl7ToXml,
    /// XML document in, HL7 wire text out
    XmlToHl7,
}

impl Direction {
    /// Resolve the direction for a pair of format tags as written in the configuration
    ///
    /// Returns `None` for any pair other than hl7→xml and xml→hl7, including
    /// tags that are not recognized at all.
    pub fn from_tags(input_format: &str, output_format: &str) -> Option<Self> {
        let input = FormatTag::from_str(input_format).ok()?;
        let output = FormatTag::from_str(output_format).ok()?;
        match (input, output) {
            (FormatTag::Hl7, FormatTag::Xml) => Some(Self::Hl7ToXml),
            (FormatTag::Xml, FormatTag::Hl7) => Some(Self::XmlToHl7),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hl7ToXml => write!(f, "hl7 -> xml"),
            Self::XmlToHl7 => write!(f, "xml -> hl7"),
        }
    }
}
