//! Core business logic for Conduit.
//!
//! # Modules
//!
//! - [`transform`] - The transformation engine and its section strategies
//! - [`batch`] - Directory processing with per-file failure isolation
//!
//! # Example
//!
//! ```rust,no_run
//! use conduit::core::batch::{summarize_outputs, BatchProcessor};
//! use conduit::core::transform::Transformer;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transformer = Transformer::from_mapping_file("config/inbound_config.json")?;
//!
//! let summary = BatchProcessor::new(&transformer).process_directory("data/input", "data/output")?;
//! println!("Successful: {}", summary.successful);
//! println!("Failed: {}", summary.failed);
//!
//! let outputs = summarize_outputs(transformer.config(), "data/output")?;
//! println!("Files on disk: {}", outputs.files_processed);
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod transform;
