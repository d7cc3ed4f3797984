//! Convert command implementation
//!
//! Transforms a single file in the direction the mapping configuration declares.

use super::{exit_code_for, load_transformer, EXIT_SUCCESS};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the convert command
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// File to transform
    pub input: PathBuf,

    /// Destination file
    pub output: PathBuf,

    /// Mapping configuration (overrides transform.mapping_config)
    #[arg(short, long)]
    pub mapping: Option<String>,
}

impl ConvertArgs {
    /// Execute the convert command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (_, transformer) = match load_transformer(config_path, self.mapping.as_deref()) {
            Ok(loaded) => loaded,
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        match transformer.transform_file(&self.input, &self.output) {
            Ok(()) => {
                println!(
                    "✓ Transformed: {} → {}",
                    self.input.display(),
                    self.output.display()
                );
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                crate::log_error_with_context!(&e, "Conversion failed");
                eprintln!("{e}");
                Ok(exit_code_for(&e))
            }
        }
    }
}
