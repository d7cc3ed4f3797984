//! Structured document model
//!
//! The forward direction builds an [`XmlElement`] tree and serializes it with
//! `quick-xml`; the reverse direction deserializes only the fields it needs into
//! a [`StructuredDocument`].

pub mod element;
pub mod reader;

pub use element::XmlElement;
pub use reader::{PatientIdentity, StructuredDocument};
