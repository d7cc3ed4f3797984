//! CLI command implementations
//!
//! Every command returns a process exit code:
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | One or more files failed to transform |
//! | 2 | Configuration error |
//! | 5 | Fatal error |

pub mod convert;
pub mod process;
pub mod validate;

use crate::config::{load_config_or_default, ConduitConfig};
use crate::core::transform::Transformer;
use crate::domain::{ConduitError, Result};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FILE_FAILURES: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;
pub const EXIT_FATAL: i32 = 5;

/// Exit code reported for an error that ends a command
pub fn exit_code_for(error: &ConduitError) -> i32 {
    match error {
        ConduitError::Configuration(_) | ConduitError::Mapping(_) => EXIT_CONFIG_ERROR,
        ConduitError::Transformation(_) => EXIT_FILE_FAILURES,
        _ => EXIT_FATAL,
    }
}

/// Loads the tool configuration, then the mapping it names unless `mapping_override` is set
///
/// A mapping whose format pair no transformer supports is rejected here so that
/// it surfaces as a configuration error.
pub(crate) fn load_transformer(
    config_path: &str,
    mapping_override: Option<&str>,
) -> Result<(ConduitConfig, Transformer)> {
    let config = load_config_or_default(config_path)?;
    let mapping_path = mapping_override.unwrap_or(&config.transform.mapping_config);
    let transformer = Transformer::from_mapping_file(mapping_path)?;
    transformer
        .config()
        .validate()
        .map_err(ConduitError::Configuration)?;
    Ok((config, transformer))
}
