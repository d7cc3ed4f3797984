//! Structured→wire emitter
//!
//! The reverse direction is not mapping driven. It writes a fixed `MSH` header
//! and, when the document carries a `Patient` element, a `PID` line built from
//! fixed positions. All other structured content is dropped.

use crate::xml::StructuredDocument;
use chrono::NaiveDateTime;

const HEADER_PREFIX: &str = "MSH|^~\\&|DEMO|SYSTEM|TARGET|SYSTEM";
const HEADER_MESSAGE_TYPE: &str = "ADT^A01^ADT_A01";
const HEADER_PROCESSING_ID: &str = "P";
const HEADER_VERSION: &str = "2.5";
const HEADER_TIME_FORMAT: &str = "%Y%m%d%H%M";
const SEQUENCE_MODULUS: u64 = 10_000;

/// Renders `document` as wire text stamped with `now`
///
/// Lines are joined with `\n`; there is no trailing newline.
pub fn render_message(document: &StructuredDocument, now: NaiveDateTime) -> String {
    let mut lines = vec![header_line(document.timestamp(), now)];

    if let Some(patient) = document.patient() {
        let name = patient.composed_name().unwrap_or_default();
        let fields = [
            "PID",
            "1",
            "",
            patient.patient_id().unwrap_or_default(),
            "",
            name.as_str(),
        ];
        lines.push(fields.join("|"));
    }

    lines.join("\n")
}

fn header_line(timestamp: &str, now: NaiveDateTime) -> String {
    format!(
        "{HEADER_PREFIX}|{}||{HEADER_MESSAGE_TYPE}|{}|{HEADER_PROCESSING_ID}|{HEADER_VERSION}",
        now.format(HEADER_TIME_FORMAT),
        sequence_number(timestamp)
    )
}

/// Deterministic control id derived from the document timestamp
pub fn sequence_number(timestamp: &str) -> u64 {
    let hash = timestamp
        .bytes()
        .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)));
    hash % SEQUENCE_MODULUS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::PatientIdentity;
    use chrono::NaiveDate;

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_sequence_number_is_deterministic() {
        assert_eq!(sequence_number(""), 0);
        assert_eq!(sequence_number("A"), 65);
        assert_eq!(sequence_number("AB"), (65 * 31 + 66) % 10_000);
        assert_eq!(
            sequence_number("2024-01-15T10:30:00"),
            sequence_number("2024-01-15T10:30:00")
        );
        assert!(sequence_number("2024-01-15T10:30:00.123456") < 10_000);
    }

    #[test]
    fn test_header_only_without_patient() {
        let document = StructuredDocument {
            timestamp: Some("A".to_string()),
            ..Default::default()
        };
        let hl7 = render_message(&document, fixed_now());
        assert_eq!(
            hl7,
            "MSH|^~\\&|DEMO|SYSTEM|TARGET|SYSTEM|202401151030||ADT^A01^ADT_A01|65|P|2.5"
        );
    }

    #[test]
    fn test_patient_line() {
        let document = StructuredDocument {
            timestamp: Some(String::new()),
            patients: vec![PatientIdentity {
                patient_ids: vec!["123456789".to_string()],
                last_names: vec!["DOE".to_string()],
                first_names: vec!["JANE".to_string()],
            }],
            ..Default::default()
        };
        let hl7 = render_message(&document, fixed_now());
        let lines: Vec<&str> = hl7.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "PID|1||123456789||DOE^JANE");
        assert!(!hl7.ends_with('\n'));
    }

    #[test]
    fn test_patient_line_with_partial_identity() {
        let document = StructuredDocument {
            patients: vec![PatientIdentity {
                last_names: vec!["DOE".to_string()],
                ..Default::default()
            }],
            ..Default::default()
        };
        let hl7 = render_message(&document, fixed_now());
        assert_eq!(hl7.lines().nth(1), Some("PID|1||||"));
    }
}
