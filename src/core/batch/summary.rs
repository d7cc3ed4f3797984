//! Batch summary and output reporting
//!
//! This module defines structures for tracking and reporting directory runs.

use crate::core::transform::TIMESTAMP_FORMAT;
use crate::domain::Result;
use crate::mapping::TransformationConfig;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Output subdirectory receiving wire files produced from structured input
pub const HL7_OUTPUT_DIR: &str = "hl7_output";

/// Output subdirectory receiving structured files produced from wire input
pub const XML_OUTPUT_DIR: &str = "xml_output";

/// A single file that could not be transformed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileError {
    /// Input file that failed
    pub input: PathBuf,

    /// Error message
    pub message: String,
}

impl FileError {
    pub fn new(input: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            message: message.into(),
        }
    }
}

/// Summary of a directory run
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Input files matching the configured direction
    pub total_files: usize,

    /// Files transformed successfully
    pub successful: usize,

    /// Files that failed to transform
    pub failed: usize,

    /// Input files found in the subtree of the other direction
    pub skipped: usize,

    /// Whether outputs were withheld
    pub dry_run: bool,

    /// Output paths written, in processing order
    pub produced: Vec<PathBuf>,

    /// Per-file failures
    pub errors: Vec<FileError>,

    /// Duration of the run
    pub duration: Duration,
}

impl BatchSummary {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a successful file; `output` is `None` in dry-run mode
    pub fn add_success(&mut self, output: Option<PathBuf>) {
        self.total_files += 1;
        self.successful += 1;
        self.produced.extend(output);
    }

    /// Record a failed file
    pub fn add_failure(&mut self, error: FileError) {
        self.total_files += 1;
        self.failed += 1;
        self.errors.push(error);
    }

    pub fn add_skipped(&mut self, count: usize) {
        self.skipped += count;
    }

    /// True when no file failed
    pub fn is_successful(&self) -> bool {
        self.failed == 0 && self.errors.is_empty()
    }

    /// Get success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_files == 0 {
            return 100.0;
        }
        (self.successful as f64 / self.total_files as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_files = self.total_files,
            successful = self.successful,
            failed = self.failed,
            skipped = self.skipped,
            produced = self.produced.len(),
            dry_run = self.dry_run,
            duration_ms = self.duration.as_millis(),
            success_rate = format!("{:.2}%", self.success_rate()),
            "Batch completed"
        );

        if !self.errors.is_empty() {
            tracing::warn!(error_count = self.errors.len(), "Batch completed with errors");
            for error in &self.errors {
                tracing::warn!(
                    input = %error.input.display(),
                    message = %error.message,
                    "Batch error"
                );
            }
        }
    }
}

/// Contents of an output root after one or more runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSummary {
    pub files_processed: usize,
    pub hl7_files: usize,
    pub xml_files: usize,
    pub input_format: String,
    pub output_format: String,
    pub config_name: String,
    pub timestamp: String,
    /// File names, `hl7_output` entries first, each group sorted
    pub output_files: Vec<String>,
}

/// Counts the files present under `output_root/hl7_output` and `output_root/xml_output`
///
/// Missing subdirectories count as empty.
pub fn summarize_outputs(
    config: &TransformationConfig,
    output_root: impl AsRef<Path>,
) -> Result<OutputSummary> {
    let output_root = output_root.as_ref();
    let hl7_files = list_file_names(&output_root.join(HL7_OUTPUT_DIR))?;
    let xml_files = list_file_names(&output_root.join(XML_OUTPUT_DIR))?;

    Ok(OutputSummary {
        files_processed: hl7_files.len() + xml_files.len(),
        hl7_files: hl7_files.len(),
        xml_files: xml_files.len(),
        input_format: config.input_format.clone(),
        output_format: config.output_format.clone(),
        config_name: config.config_name().to_string(),
        timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        output_files: hl7_files.into_iter().chain(xml_files).collect(),
    })
}

fn list_file_names(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}
