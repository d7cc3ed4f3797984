//! Dotted field references: `SEGMENT.FIELD[.COMPONENT]`
//!
//! Field and component indices are 1-based. An omitted component addresses the
//! whole raw field; an explicit `.1` addresses the first component only.

use super::message::{Message, Segment};
use crate::domain::{ConduitError, Result};
use std::fmt;

/// Parsed field reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReference {
    segment_type: String,
    field: usize,
    component: Option<usize>,
}

impl FieldReference {
    pub fn new(segment_type: impl Into<String>, field: usize, component: Option<usize>) -> Self {
        Self {
            segment_type: segment_type.into(),
            field,
            component,
        }
    }

    /// Parses a dotted reference
    ///
    /// Returns `Ok(None)` when the reference has fewer than two parts; such a
    /// reference never resolves. A non-numeric field or component index is an error.
    /// Parts beyond the component are ignored.
    pub fn parse(reference: &str) -> Result<Option<Self>> {
        let parts: Vec<&str> = reference.split('.').collect();
        if parts.len() < 2 {
            return Ok(None);
        }

        let field = parse_index(reference, parts[1])?;
        let component = parts
            .get(2)
            .map(|part| parse_index(reference, part))
            .transpose()?;

        Ok(Some(Self::new(parts[0], field, component)))
    }

    pub fn segment_type(&self) -> &str {
        &self.segment_type
    }

    pub fn field(&self) -> usize {
        self.field
    }

    pub fn component(&self) -> Option<usize> {
        self.component
    }

    /// Resolves against the first segment of the referenced type
    pub fn resolve<'m>(&self, message: &'m Message) -> Option<&'m str> {
        let segment = message.get_segment(&self.segment_type, 0)?;
        self.resolve_in(segment)
    }

    /// Resolves against an already selected segment
    ///
    /// The segment type token of the reference is ignored; the field and component
    /// indices are applied to `segment` directly.
    pub fn resolve_in<'s>(&self, segment: &'s Segment) -> Option<&'s str> {
        let field = segment.field(self.field)?;
        match self.component {
            Some(index) => field.component(index),
            None => field.value(),
        }
    }
}

impl fmt::Display for FieldReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.segment_type, self.field)?;
        if let Some(component) = self.component {
            write!(f, ".{component}")?;
        }
        Ok(())
    }
}

fn parse_index(reference: &str, part: &str) -> Result<usize> {
    part.trim().parse::<usize>().map_err(|_| {
        ConduitError::Mapping(format!(
            "Invalid field reference '{reference}': '{part}' is not a numeric index"
        ))
    })
}

impl Message {
    /// Resolves a dotted reference string against this message
    ///
    /// Misses resolve to `Ok(None)`; only a non-numeric index is an error.
    pub fn get_field_value(&self, reference: &str) -> Result<Option<&str>> {
        Ok(FieldReference::parse(reference)?.and_then(|r| r.resolve(self)))
    }
}
