//! Declarative mapping configuration.
//!
//! The mapping configuration is the program the transformation engine
//! interprets. It is loaded from JSON and compiled once into typed sections:
//!
//! - [`field`] - Leaf field mappings (`source`, `type`, `format`, `required`)
//! - [`section`] - Section classification into output strategies
//! - [`schema`] - The document-level [`TransformationConfig`]
//! - [`loader`] - Reading configurations from disk
//!
//! # Example Configuration
//!
//! ```json
//! {
//!   "config_name": "meditech_inbound",
//!   "input_format": "hl7",
//!   "output_format": "xml",
//!   "mappings": {
//!     "patient": {
//!       "patient_id": {"source": "PID.4.1", "type": "string", "required": true},
//!       "date_of_birth": {"source": "PID.8", "type": "date", "format": "YYYYMMDD"},
//!       "address": {"city": {"source": "PID.12.3"}}
//!     },
//!     "allergies": {
//!       "source": "AL1",
//!       "fields": {"allergen": {"source": "AL1.4.2"}}
//!     },
//!     "financial_information": {
//!       "source": "OBX",
//!       "filter": {"observation_id": ["LOAN_INTEREST"]},
//!       "fields": {"value": {"source": "OBX.6"}}
//!     }
//!   }
//! }
//! ```

pub mod field;
pub mod loader;
pub mod schema;
pub mod section;

pub use field::{ArrayField, FieldConfig};
pub use loader::load_mapping_config;
pub use schema::TransformationConfig;
pub use section::{FieldGroup, FieldNode, NamedField, Section, SectionKind};
