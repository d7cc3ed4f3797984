//! Integration tests for directory batch processing

use conduit::core::batch::{summarize_outputs, BatchProcessor};
use conduit::core::transform::Transformer;
use conduit::mapping::TransformationConfig;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const ADT: &str = "MSH|^~\\&|EPIC|UCDMC|CERNER|UCDMC|202312151430||ADT^A01^ADT_A01|12345|P|2.5\n\
PID|1||123456789^^^UCDMC^MR||DOE^JANE^MARIE^||19850315|F";

const STRUCTURED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<HealthcareMessage version="1.0" timestamp="2024-01-01T00:00:00.000000" transformation_config="test">
  <Patient>
    <PatientId>123456789</PatientId>
    <LastName>DOE</LastName>
    <FirstName>JANE</FirstName>
  </Patient>
</HealthcareMessage>
"#;

fn transformer(json: &str) -> Transformer {
    Transformer::new(TransformationConfig::from_json_str(json).unwrap())
}

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn test_hl7_subtree_produces_xml_output() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(&input.path().join("hl7/adt_a01.hl7"), ADT);
    write(&input.path().join("hl7/adt_a04.hl7"), ADT);
    write(&input.path().join("hl7/readme.txt"), "not a message");
    write(&input.path().join("xml/reply.xml"), STRUCTURED);

    let transformer = transformer(
        r#"{"config_name": "inbound", "mappings": {"patient": {"patient_id": {"source": "PID.4.1"}}}}"#,
    );
    let summary = BatchProcessor::new(&transformer)
        .process_directory(input.path(), output.path())
        .unwrap();

    assert_eq!(summary.total_files, 2);
    assert_eq!(summary.successful, 2);
    assert_eq!(summary.skipped, 1);
    assert!(summary.is_successful());
    assert_eq!(
        summary.produced,
        vec![
            output.path().join("xml_output/adt_a01.xml"),
            output.path().join("xml_output/adt_a04.xml"),
        ]
    );
    assert!(output.path().join("hl7_output").is_dir());

    let xml = fs::read_to_string(output.path().join("xml_output/adt_a01.xml")).unwrap();
    assert!(xml.contains("<PatientId>123456789</PatientId>"));

    let outputs = summarize_outputs(transformer.config(), output.path()).unwrap();
    assert_eq!(outputs.files_processed, 2);
    assert_eq!(outputs.xml_files, 2);
    assert_eq!(outputs.hl7_files, 0);
    assert_eq!(outputs.config_name, "inbound");
}

#[test]
fn test_failed_file_does_not_stop_batch() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(&input.path().join("xml/a_good.xml"), STRUCTURED);
    write(
        &input.path().join("xml/b_broken.xml"),
        "<HealthcareMessage><Patient></Wrong></HealthcareMessage>",
    );
    write(&input.path().join("xml/c_good.xml"), STRUCTURED);

    let transformer = transformer(r#"{"input_format": "xml", "output_format": "hl7"}"#);
    let summary = BatchProcessor::new(&transformer)
        .process_directory(input.path(), output.path())
        .unwrap();

    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.successful, 2);
    assert_eq!(summary.failed, 1);
    assert!(!summary.is_successful());
    assert!(summary.errors[0].input.ends_with("b_broken.xml"));
    assert!(summary.errors[0].message.contains("b_broken.xml"));

    let hl7 = fs::read_to_string(output.path().join("hl7_output/c_good.hl7")).unwrap();
    assert!(hl7.lines().nth(1).unwrap().starts_with("PID|1||123456789||DOE^JANE"));
    assert!(!output.path().join("hl7_output/b_broken.hl7").exists());
}

#[test]
fn test_dry_run_writes_nothing() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(&input.path().join("hl7/adt.hl7"), ADT);

    let transformer =
        transformer(r#"{"mappings": {"patient": {"patient_id": {"source": "PID.4.1"}}}}"#);
    let summary = BatchProcessor::new(&transformer)
        .with_dry_run(true)
        .process_directory(input.path(), output.path())
        .unwrap();

    assert!(summary.dry_run);
    assert_eq!(summary.successful, 1);
    assert!(summary.produced.is_empty());
    assert!(!output.path().join("xml_output").exists());
}

#[test]
fn test_unsupported_direction_is_an_error() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    let transformer = transformer(r#"{"input_format": "json", "output_format": "xml"}"#);
    let result = BatchProcessor::new(&transformer).process_directory(input.path(), output.path());

    assert!(result.is_err());
}

#[test]
fn test_missing_input_root_is_empty_batch() {
    let output = TempDir::new().unwrap();
    let transformer = transformer("{}");

    let summary = BatchProcessor::new(&transformer)
        .process_directory(output.path().join("nowhere"), output.path())
        .unwrap();

    assert_eq!(summary.total_files, 0);
    assert_eq!(summary.success_rate(), 100.0);
}
