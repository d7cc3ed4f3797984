//! Segment/field/component model for pipe-delimited HL7 v2 messages
//!
//! A [`Message`] is parsed once from raw text and is immutable afterwards. Fields
//! are decomposed into components eagerly, using the component delimiter taken
//! from the first `MSH` segment of the message.

use crate::domain::{ConduitError, Result};
use std::fs;
use std::path::Path;

/// Field delimiter; fixed for every message
pub const FIELD_DELIMITER: char = '|';

/// Segment type code of the header segment that declares encoding characters
pub const HEADER_SEGMENT: &str = "MSH";

/// Delimiter characters in effect for a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    pub field: char,
    pub component: char,
    pub repetition: char,
    pub escape: char,
    pub subcomponent: char,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            field: FIELD_DELIMITER,
            component: '^',
            repetition: '~',
            escape: '\\',
            subcomponent: '&',
        }
    }
}

impl Delimiters {
    /// Reads delimiters positionally from an encoding-characters field such as `^~\&`
    ///
    /// Returns `None` when fewer than four characters are present.
    pub fn from_encoding_characters(encoding: &str) -> Option<Self> {
        let mut chars = encoding.chars();
        Some(Self {
            field: FIELD_DELIMITER,
            component: chars.next()?,
            repetition: chars.next()?,
            escape: chars.next()?,
            subcomponent: chars.next()?,
        })
    }
}

/// A single delimited slot within a segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    raw: String,
    components: Vec<String>,
}

impl Field {
    /// Creates a field, splitting it into components on `component_delimiter`
    pub fn new(raw: impl Into<String>, component_delimiter: char) -> Self {
        let raw = raw.into();
        let components = if raw.is_empty() {
            Vec::new()
        } else {
            raw.split(component_delimiter).map(str::to_string).collect()
        };
        Self { raw, components }
    }

    /// The undecomposed field text
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The raw value, or `None` when the field is blank
    pub fn value(&self) -> Option<&str> {
        (!self.raw.is_empty()).then_some(self.raw.as_str())
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// Component by 1-based index
    ///
    /// Out-of-range indices and blank components both resolve to `None`.
    pub fn component(&self, index: usize) -> Option<&str> {
        if index == 0 {
            return None;
        }
        self.components
            .get(index - 1)
            .map(String::as_str)
            .filter(|c| !c.is_empty())
    }
}

/// One line of the wire format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    segment_type: String,
    fields: Vec<Field>,
}

impl Segment {
    /// Splits one line into fields; field 1 is the segment type code
    pub fn parse(line: &str, delimiters: &Delimiters) -> Self {
        let fields: Vec<Field> = line
            .split(delimiters.field)
            .map(|raw| Field::new(raw, delimiters.component))
            .collect();
        let segment_type = fields
            .first()
            .map(|f| f.raw().to_string())
            .unwrap_or_default();
        Self {
            segment_type,
            fields,
        }
    }

    pub fn segment_type(&self) -> &str {
        &self.segment_type
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Field by 1-based index (index 1 is the type code)
    pub fn field(&self, index: usize) -> Option<&Field> {
        if index == 0 {
            return None;
        }
        self.fields.get(index - 1)
    }

    /// Raw field strings in order, type code first
    pub fn raw_fields(&self) -> Vec<&str> {
        self.fields.iter().map(Field::raw).collect()
    }
}

/// Raw dump of one segment, as returned by [`Message::segment_values`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentValues {
    pub segment_type: String,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone)]
struct SegmentGroup {
    segment_type: String,
    segments: Vec<Segment>,
}

/// Root parse result: segments grouped by type in first-appearance order
#[derive(Debug, Clone)]
pub struct Message {
    groups: Vec<SegmentGroup>,
    delimiters: Delimiters,
}

impl Message {
    /// Parses raw message text
    ///
    /// Segments may be separated by `\r`, `\n` or both; blank lines are discarded.
    /// Delimiters come from the encoding-characters field of the first `MSH`
    /// segment and apply to every segment; without one the defaults are used. Text with no usable lines yields an empty message.
    pub fn parse(text: &str) -> Self {
        let lines: Vec<&str> = text
            .split(['\r', '\n'])
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let delimiters = lines
            .iter()
            .find_map(|line| {
                let mut fields = line.split(FIELD_DELIMITER);
                if fields.next() == Some(HEADER_SEGMENT) {
                    fields.next()
                } else {
                    None
                }
            })
            .and_then(Delimiters::from_encoding_characters)
            .unwrap_or_default();

        let mut groups: Vec<SegmentGroup> = Vec::new();
        for line in lines {
            let segment = Segment::parse(line, &delimiters);
            match groups
                .iter_mut()
                .find(|g| g.segment_type == segment.segment_type())
            {
                Some(group) => group.segments.push(segment),
                None => groups.push(SegmentGroup {
                    segment_type: segment.segment_type().to_string(),
                    segments: vec![segment],
                }),
            }
        }

        tracing::trace!(
            segment_types = groups.len(),
            component_delimiter = %delimiters.component,
            "Parsed HL7 message"
        );

        Self { groups, delimiters }
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// True when no segment was parsed
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of segments across all types
    pub fn segment_count(&self) -> usize {
        self.groups.iter().map(|g| g.segments.len()).sum()
    }

    /// Segment type codes in first-appearance order
    pub fn segment_types(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.segment_type.as_str())
    }

    /// All segments of a type in document order
    pub fn get_segments(&self, segment_type: &str) -> &[Segment] {
        self.groups
            .iter()
            .find(|g| g.segment_type == segment_type)
            .map(|g| g.segments.as_slice())
            .unwrap_or(&[])
    }

    /// Segment of a type by 0-based position within its group
    pub fn get_segment(&self, segment_type: &str, index: usize) -> Option<&Segment> {
        self.get_segments(segment_type).get(index)
    }

    /// Every segment of a type as its raw field list
    pub fn segment_values(&self, segment_type: &str) -> Vec<SegmentValues> {
        self.get_segments(segment_type)
            .iter()
            .map(|s| SegmentValues {
                segment_type: s.segment_type().to_string(),
                fields: s.raw_fields().into_iter().map(str::to_string).collect(),
            })
            .collect()
    }
}

/// Parses an HL7 message from text
pub fn parse(text: &str) -> Message {
    Message::parse(text)
}

/// Reads and parses an HL7 message from a file
pub fn parse_file(path: impl AsRef<Path>) -> Result<Message> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        ConduitError::Io(format!("Failed to read HL7 file {}: {e}", path.display()))
    })?;
    Ok(Message::parse(&text))
}
