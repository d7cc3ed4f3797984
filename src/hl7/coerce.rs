//! Type-aware value coercion
//!
//! Dates and date-times arrive as fixed-width digit strings and are re-rendered
//! with separators. Values that do not parse under their declared format pass
//! through unchanged.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// `YYYYMMDD` wire date
pub const DATE_FORMAT: &str = "YYYYMMDD";

/// `YYYYMMDDHHMM` wire date-time
pub const DATETIME_FORMAT: &str = "YYYYMMDDHHMM";

/// Scalar type declared on a field mapping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    #[default]
    String,
    Date,
    Datetime,
    /// Any other declared type; passed through unchanged
    Other(String),
}

impl From<String> for FieldType {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "string" => Self::String,
            "date" => Self::Date,
            "datetime" => Self::Datetime,
            _ => Self::Other(value),
        }
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        match value {
            FieldType::String => "string".to_string(),
            FieldType::Date => "date".to_string(),
            FieldType::Datetime => "datetime".to_string(),
            FieldType::Other(other) => other,
        }
    }
}

/// Reformats a wire date according to `input_format`
///
/// Returns `None` for empty input. Unknown formats, wrong lengths and values that
/// fail to parse are returned unchanged.
pub fn format_date(value: &str, input_format: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }

    let formatted = match input_format {
        DATE_FORMAT if value.len() == 8 => NaiveDate::parse_from_str(value, "%Y%m%d")
            .ok()
            .map(|d| d.format("%Y-%m-%d").to_string()),
        DATETIME_FORMAT if value.len() == 12 => {
            NaiveDateTime::parse_from_str(value, "%Y%m%d%H%M")
                .ok()
                .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        }
        _ => None,
    };

    Some(formatted.unwrap_or_else(|| value.to_string()))
}

/// Coerces a resolved value according to its declared type and format
///
/// Only `date` and `datetime` with a declared format are reformatted. Absent or
/// empty input stays absent.
pub fn coerce(raw: Option<&str>, field_type: &FieldType, format: Option<&str>) -> Option<String> {
    let raw = raw.filter(|v| !v.is_empty())?;
    match (field_type, format) {
        (FieldType::Date | FieldType::Datetime, Some(format)) => format_date(raw, format),
        _ => Some(raw.to_string()),
    }
}
