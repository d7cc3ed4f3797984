//! Batch processing over input directories
//!
//! Each file is an independent transformation; failures are isolated per file
//! and reported in a [`BatchSummary`].

pub mod processor;
pub mod summary;

pub use processor::BatchProcessor;
pub use summary::{summarize_outputs, BatchSummary, FileError, OutputSummary};
