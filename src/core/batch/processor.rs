//! Directory batch processing
//!
//! Walks the `hl7/` and `xml/` subtrees of an input root and transforms every
//! file whose subtree matches the configured direction. A failing file is
//! recorded and the run continues with the next one.

use super::summary::{BatchSummary, FileError, HL7_OUTPUT_DIR, XML_OUTPUT_DIR};
use crate::core::transform::Transformer;
use crate::domain::{ConduitError, Direction, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Input subdirectory holding wire files
pub const HL7_INPUT_DIR: &str = "hl7";

/// Input subdirectory holding structured files
pub const XML_INPUT_DIR: &str = "xml";

/// One input subtree and where its outputs go
struct Subtree {
    direction: Direction,
    input_dir: &'static str,
    extension: &'static str,
    output_dir: &'static str,
    output_extension: &'static str,
}

const SUBTREES: [Subtree; 2] = [
    Subtree {
        direction: Direction::Hl7ToXml,
        input_dir: HL7_INPUT_DIR,
        extension: "hl7",
        output_dir: XML_OUTPUT_DIR,
        output_extension: "xml",
    },
    Subtree {
        direction: Direction::XmlToHl7,
        input_dir: XML_INPUT_DIR,
        extension: "xml",
        output_dir: HL7_OUTPUT_DIR,
        output_extension: "hl7",
    },
];

/// Batch processor for input directories
pub struct BatchProcessor<'a> {
    transformer: &'a Transformer,
    dry_run: bool,
}

impl<'a> BatchProcessor<'a> {
    pub fn new(transformer: &'a Transformer) -> Self {
        Self {
            transformer,
            dry_run: false,
        }
    }

    /// Transform without writing outputs
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Processes `input_root/hl7/*.hl7` into `output_root/xml_output/*.xml` and
    /// `input_root/xml/*.xml` into `output_root/hl7_output/*.hl7`
    ///
    /// Only the subtree matching the configured direction is transformed; files
    /// in the other subtree are counted as skipped. Files are processed in sorted
    /// path order.
    ///
    /// # Errors
    ///
    /// Per-file failures are collected in the summary. An error is returned only
    /// for an unsupported direction or when the input or output directories
    /// cannot be listed or created.
    pub fn process_directory(
        &self,
        input_root: impl AsRef<Path>,
        output_root: impl AsRef<Path>,
    ) -> Result<BatchSummary> {
        let input_root = input_root.as_ref();
        let output_root = output_root.as_ref();
        let start = Instant::now();
        let direction = self.transformer.direction()?;

        if !self.dry_run {
            for dir in [HL7_OUTPUT_DIR, XML_OUTPUT_DIR] {
                let path = output_root.join(dir);
                fs::create_dir_all(&path).map_err(|e| {
                    ConduitError::Io(format!(
                        "Failed to create output directory {}: {e}",
                        path.display()
                    ))
                })?;
            }
        }

        tracing::info!(
            input_root = %input_root.display(),
            output_root = %output_root.display(),
            direction = %direction,
            dry_run = self.dry_run,
            "Processing directory"
        );

        let mut summary = BatchSummary::new(self.dry_run);
        for subtree in &SUBTREES {
            let inputs = list_inputs(&input_root.join(subtree.input_dir), subtree.extension)?;
            if subtree.direction != direction {
                if !inputs.is_empty() {
                    tracing::debug!(
                        subtree = subtree.input_dir,
                        count = inputs.len(),
                        "Skipping subtree that does not match the configured direction"
                    );
                }
                summary.add_skipped(inputs.len());
                continue;
            }

            let total = inputs.len();
            for (index, input) in inputs.iter().enumerate() {
                crate::log_batch_processing!(index + 1, total);
                let output = output_path(output_root, subtree, input);
                self.process_file(input, &output, &mut summary);
            }
        }

        let summary = summary.with_duration(start.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    fn process_file(&self, input: &Path, output: &Path, summary: &mut BatchSummary) {
        let result = if self.dry_run {
            self.transformer.render_file(input).map(|_| None)
        } else {
            self.transformer
                .transform_file(input, output)
                .map(|()| Some(output.to_path_buf()))
        };

        match result {
            Ok(produced) => summary.add_success(produced),
            Err(e) => {
                crate::log_error_with_context!(&e, "Batch file failed");
                summary.add_failure(FileError::new(input, e.to_string()));
            }
        }
    }
}

fn output_path(output_root: &Path, subtree: &Subtree, input: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(subtree.output_extension);
    output_root.join(subtree.output_dir).join(name)
}

/// Regular files directly under `dir` with the given extension, sorted
fn list_inputs(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
