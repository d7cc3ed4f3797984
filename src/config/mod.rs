//! Configuration management for Conduit.
//!
//! Two layers of configuration exist. The JSON mapping configuration that drives
//! transformations lives in [`crate::mapping`]. This module covers the tool
//! configuration, `conduit.toml`, with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `CONDUIT_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use conduit::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("conduit.toml")?;
//!
//! println!("Mapping: {}", config.transform.mapping_config);
//! println!("Input: {}", config.transform.input_dir);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//! dry_run = false
//!
//! [transform]
//! mapping_config = "config/inbound_config.json"
//! input_dir = "data/input"
//! output_dir = "${CONDUIT_OUTPUT_ROOT}"
//!
//! [logging]
//! local_enabled = true
//! local_path = "./logs"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{ApplicationConfig, ConduitConfig, LoggingConfig, TransformConfig};
