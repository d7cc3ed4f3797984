//! Advisory structural checks
//!
//! Findings are warnings only; a message that fails every check is still
//! transformed.

use super::message::{Message, HEADER_SEGMENT};

/// Checks message structure and returns human-readable warnings
pub fn validate_message(message: &Message) -> Vec<String> {
    let mut warnings = Vec::new();

    let Some(msh) = message.get_segment(HEADER_SEGMENT, 0) else {
        warnings.push("Missing required MSH segment".to_string());
        return warnings;
    };

    let is_adt = msh
        .field(9)
        .is_some_and(|message_type| message_type.raw().contains("ADT"));
    if is_adt && message.get_segment("PID", 0).is_none() {
        warnings.push("Missing required PID segment for ADT message".to_string());
    }

    warnings
}
