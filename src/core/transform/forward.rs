//! Wire→structured section strategies
//!
//! Each compiled [`Section`] appends exactly one wrapper element to the document
//! root, even when nothing inside it resolves.

use super::camel_case;
use crate::hl7::{Message, Segment};
use crate::mapping::section::OBSERVATION_SEGMENT;
use crate::mapping::{ArrayField, FieldNode, NamedField, Section, SectionKind};
use crate::xml::XmlElement;

pub(crate) const HEADER_ELEMENT: &str = "MessageHeader";
pub(crate) const PATIENT_ELEMENT: &str = "Patient";
pub(crate) const VISIT_ELEMENT: &str = "Visit";
pub(crate) const CUSTOM_SEGMENTS_ELEMENT: &str = "CustomSegments";

/// Field index (type code counted) of the observation identifier
const OBSERVATION_ID_FIELD: usize = 4;

/// Renders one section under `root`
pub(crate) fn render_section(root: &mut XmlElement, section: &Section, message: &Message) {
    match &section.kind {
        SectionKind::HeaderSection(fields) => {
            let header = root.push(XmlElement::new(HEADER_ELEMENT));
            render_fields(header, fields, message);
        }
        SectionKind::PatientSection(nodes) => {
            render_object(root.push(XmlElement::new(PATIENT_ELEMENT)), nodes, message);
        }
        SectionKind::VisitSection(nodes) => {
            render_object(root.push(XmlElement::new(VISIT_ELEMENT)), nodes, message);
        }
        SectionKind::CustomGroup(groups) => {
            let wrapper = root.push(XmlElement::new(CUSTOM_SEGMENTS_ELEMENT));
            for group in groups {
                let element = wrapper.push(XmlElement::new(camel_case(&group.name)));
                render_fields(element, &group.fields, message);
            }
        }
        SectionKind::FilteredArray {
            fields,
            observation_ids,
        } => {
            let wrapper = root.push(XmlElement::new(camel_case(&section.name)));
            let item_name = camel_case(singular(&section.name));
            for segment in message.get_segments(OBSERVATION_SEGMENT) {
                if passes_filter(segment, observation_ids) {
                    wrapper.push(render_item(&item_name, fields, segment));
                }
            }
        }
        SectionKind::PlainArray { source, fields } => {
            let wrapper = root.push(XmlElement::new(camel_case(&section.name)));
            let Some(source) = source else {
                return;
            };
            let item_name = camel_case(singular(&section.name));
            for segment in message.get_segments(source) {
                wrapper.push(render_item(&item_name, fields, segment));
            }
        }
    }
}

/// Leaf fields resolved from the message root, honoring `required`
fn render_fields(parent: &mut XmlElement, fields: &[NamedField], message: &Message) {
    for field in fields {
        let value = field.config.extract(message);
        if value.is_some() || field.config.required {
            parent.push(XmlElement::with_text(
                camel_case(&field.name),
                value.unwrap_or_default(),
            ));
        }
    }
}

fn render_object(parent: &mut XmlElement, nodes: &[FieldNode], message: &Message) {
    for node in nodes {
        match node {
            FieldNode::Leaf(field) => render_fields(parent, std::slice::from_ref(field), message),
            FieldNode::Nested { name, fields } => {
                let nested = parent.push(XmlElement::new(camel_case(name)));
                render_fields(nested, fields, message);
            }
        }
    }
}

/// One array item; fields resolve against `segment` and empty values are omitted
fn render_item(name: &str, fields: &[ArrayField], segment: &Segment) -> XmlElement {
    let mut item = XmlElement::new(name);
    for field in fields {
        if let Some(value) = field.extract(segment) {
            item.push(XmlElement::with_text(camel_case(&field.name), value));
        }
    }
    item
}

fn passes_filter(segment: &Segment, observation_ids: &[String]) -> bool {
    if observation_ids.is_empty() {
        return true;
    }
    let observation_id = segment
        .field(OBSERVATION_ID_FIELD)
        .and_then(|field| field.component(1))
        .unwrap_or_default();
    observation_ids.iter().any(|id| id == observation_id)
}

fn singular(name: &str) -> &str {
    name.strip_suffix('s').unwrap_or(name)
}
