// Conduit - HL7 v2 / XML Interface Transformer
// Copyright (c) 2025 Conduit Contributors
// Licensed under the MIT License

//! # Conduit - HL7 v2 / XML Interface Transformer
//!
//! Conduit converts pipe-delimited HL7 v2 messages into a structured XML document
//! whose layout is described by a declarative JSON mapping configuration, and
//! derives a minimal HL7 v2 message back from such a document.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`hl7`] - HL7 v2 parsing, field addressing and date coercion
//! - [`mapping`] - Mapping configuration loading and section classification
//! - [`xml`] - Structured document model and serialization
//! - [`core`] - Transformation engine and batch processing
//! - [`domain`] - Shared error and format types
//! - [`config`] - Tool configuration (`conduit.toml`)
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use conduit::core::transform::Transformer;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transformer = Transformer::from_mapping_file("config/inbound_config.json")?;
//!     transformer.transform_file(
//!         Path::new("data/input/hl7/adt_a01.hl7"),
//!         Path::new("data/output/xml_output/adt_a01.xml"),
//!     )?;
//!     Ok(())
//! }
//! ```
//!
//! ## In-Memory Transformation
//!
//! ```rust
//! use conduit::core::transform::Transformer;
//! use conduit::hl7;
//! use conduit::mapping::TransformationConfig;
//!
//! let config = TransformationConfig::from_json_str(
//!     r#"{"mappings": {"patient": {"patient_id": {"source": "PID.4.1"}}}}"#,
//! )
//! .unwrap();
//! let message = hl7::parse("MSH|^~\\&|A|B\rPID|1||MRN123");
//! let document = Transformer::new(config).transform(&message);
//!
//! let patient = document.child("Patient").unwrap();
//! assert_eq!(patient.child("PatientId").unwrap().text(), Some("MRN123"));
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod hl7;
pub mod logging;
pub mod mapping;
pub mod xml;
