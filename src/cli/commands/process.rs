//! Process command implementation
//!
//! This module implements the `process` command, which transforms every file
//! under an input root into the matching output subtree.

use super::{exit_code_for, load_transformer, EXIT_FILE_FAILURES, EXIT_SUCCESS};
use crate::core::batch::{summarize_outputs, BatchProcessor};
use clap::Args;

/// Arguments for the process command
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Input root containing hl7/ and xml/ subdirectories
    #[arg(short, long)]
    pub input: Option<String>,

    /// Output root receiving hl7_output/ and xml_output/
    #[arg(short, long)]
    pub output: Option<String>,

    /// Mapping configuration (overrides transform.mapping_config)
    #[arg(short, long)]
    pub mapping: Option<String>,

    /// Dry run mode - transform without writing output files
    #[arg(long)]
    pub dry_run: bool,
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting process command");

        let (config, transformer) = match load_transformer(config_path, self.mapping.as_deref()) {
            Ok(loaded) => loaded,
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let input = self.input.as_deref().unwrap_or(&config.transform.input_dir);
        let output = self.output.as_deref().unwrap_or(&config.transform.output_dir);
        let dry_run = self.dry_run || config.application.dry_run;

        let mapping = transformer.config();
        println!("🔄 Healthcare Interface Transformation");
        println!("  Input Format:  {}", mapping.input_format.to_uppercase());
        println!("  Output Format: {}", mapping.output_format.to_uppercase());
        println!("  Config:        {}", mapping.config_name());
        if dry_run {
            println!("  🔍 DRY RUN MODE - No files will be written");
        }
        println!();

        let summary = match BatchProcessor::new(&transformer)
            .with_dry_run(dry_run)
            .process_directory(input, output)
        {
            Ok(summary) => summary,
            Err(e) => {
                crate::log_error_with_context!(&e, "Batch processing failed");
                eprintln!("Processing failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        if !summary.produced.is_empty() {
            println!("✅ Successfully processed {} files:", summary.produced.len());
            for path in &summary.produced {
                let name = path.file_name().unwrap_or_default().to_string_lossy();
                println!("   📄 {name}");
            }
            println!();
        }

        println!("📊 Batch Summary:");
        println!("  Total Files: {}", summary.total_files);
        println!("  Successful: {}", summary.successful);
        println!("  Failed: {}", summary.failed);
        println!("  Skipped: {}", summary.skipped);
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!("  Success Rate: {:.2}%", summary.success_rate());

        if !summary.errors.is_empty() {
            println!();
            println!("  ⚠️  Errors:");
            for error in &summary.errors {
                println!("    - {}", error.message);
            }
        }

        if !dry_run {
            match summarize_outputs(mapping, output) {
                Ok(outputs) => {
                    println!();
                    println!("📁 Output Directory:");
                    println!("  Files present: {}", outputs.files_processed);
                    println!("  HL7 files: {}", outputs.hl7_files);
                    println!("  XML files: {}", outputs.xml_files);
                }
                Err(e) => tracing::warn!(error = %e, "Failed to summarize output directory"),
            }
        }
        println!();

        if summary.is_successful() {
            Ok(EXIT_SUCCESS)
        } else {
            Ok(EXIT_FILE_FAILURES)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_args_creation() {
        let args = ProcessArgs {
            input: Some("in".to_string()),
            output: None,
            mapping: None,
            dry_run: true,
        };
        assert!(format!("{args:?}").contains("dry_run: true"));
    }
}
