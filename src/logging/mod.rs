//! Logging and observability
//!
//! Structured logging with `tracing`:
//! - Console output with configurable levels
//! - Optional JSON file logging with rotation
//! - Macros for the recurring transformation events
//!
//! # Example
//!
//! ```no_run
//! use conduit::logging::init_logging;
//! use conduit::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of a file transformation
///
/// # Example
///
/// ```no_run
/// use conduit::log_transform_start;
///
/// log_transform_start!("data/input/hl7/adt.hl7", "data/output/xml_output/adt.xml");
/// ```
#[macro_export]
macro_rules! log_transform_start {
    ($input:expr, $output:expr) => {
        tracing::debug!(
            input = %$input,
            output = %$output,
            "Starting transformation"
        );
    };
}

/// Log the completion of a file transformation
///
/// # Example
///
/// ```no_run
/// use conduit::log_transform_complete;
///
/// log_transform_complete!("adt.hl7", "adt.xml", 2048);
/// ```
#[macro_export]
macro_rules! log_transform_complete {
    ($input:expr, $output:expr, $bytes:expr) => {
        tracing::info!(
            input = %$input,
            output = %$output,
            bytes = $bytes,
            "Transformed file"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use conduit::log_error_with_context;
/// use conduit::domain::ConduitError;
///
/// let error = ConduitError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log batch progress
///
/// # Example
///
/// ```no_run
/// use conduit::log_batch_processing;
///
/// log_batch_processing!(3, 10);
/// ```
#[macro_export]
macro_rules! log_batch_processing {
    ($current:expr, $total:expr) => {
        tracing::debug!(
            current = $current,
            total = $total,
            progress_pct = ($current as f64 / $total as f64 * 100.0),
            "Processing file"
        );
    };
}
