//! HL7 v2 wire format parsing.
//!
//! This module decomposes pipe-delimited message text into addressable
//! segments, fields and components:
//!
//! - [`message`] - Delimiters, [`Field`], [`Segment`] and [`Message`]
//! - [`reference`] - Dotted `SEGMENT.FIELD[.COMPONENT]` addressing
//! - [`coerce`] - Date and date-time reformatting
//! - [`validate`] - Advisory structural warnings
//!
//! # Example
//!
//! ```rust
//! use conduit::hl7;
//!
//! let message = hl7::parse("PID|1||123456789^^^UCDMC^MR||DOE^JANE^MARIE^||19850315|F");
//! assert_eq!(message.get_field_value("PID.6.1").unwrap(), Some("DOE"));
//! assert_eq!(
//!     hl7::format_date("19850315", "YYYYMMDD").as_deref(),
//!     Some("1985-03-15")
//! );
//! ```

pub mod coerce;
pub mod message;
pub mod reference;
pub mod validate;

pub use coerce::{coerce, format_date, FieldType};
pub use message::{parse, parse_file, Delimiters, Field, Message, Segment, SegmentValues};
pub use reference::FieldReference;
pub use validate::validate_message;
