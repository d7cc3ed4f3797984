//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ConduitConfig;
use crate::domain::errors::ConduitError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ConduitConfig
/// 4. Applies environment variable overrides (CONDUIT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use conduit::config::loader::load_config;
///
/// let config = load_config("conduit.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ConduitConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConduitError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ConduitError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: ConduitConfig = toml::from_str(&contents)
        .map_err(|e| ConduitError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);
    finish(config)
}

/// Like [`load_config`], but a missing file yields the defaults
///
/// Environment overrides and validation still apply.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<ConduitConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "Configuration file not found, using defaults");
    let mut config = ConduitConfig::default();
    apply_env_overrides(&mut config);
    finish(config)
}

fn finish(config: ConduitConfig) -> Result<ConduitConfig> {
    config.validate().map_err(|e| {
        ConduitError::Configuration(format!("Configuration validation failed: {}", e))
    })?;
    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ConduitError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&cap[0], &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(ConduitError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using CONDUIT_* prefix
///
/// Environment variables follow the pattern: CONDUIT_<SECTION>_<KEY>
/// For example: CONDUIT_TRANSFORM_INPUT_DIR, CONDUIT_LOGGING_LOCAL_ENABLED
fn apply_env_overrides(config: &mut ConduitConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("CONDUIT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("CONDUIT_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Transform overrides
    if let Ok(val) = std::env::var("CONDUIT_TRANSFORM_MAPPING_CONFIG") {
        config.transform.mapping_config = val;
    }
    if let Ok(val) = std::env::var("CONDUIT_TRANSFORM_INPUT_DIR") {
        config.transform.input_dir = val;
    }
    if let Ok(val) = std::env::var("CONDUIT_TRANSFORM_OUTPUT_DIR") {
        config.transform.output_dir = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("CONDUIT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CONDUIT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("CONDUIT_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Environment variables are process-wide
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn write_config(contents: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(contents.as_bytes()).unwrap();
        temp_file.flush().unwrap();
        temp_file
    }

    #[test]
    fn test_substitute_env_vars() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("CONDUIT_TEST_VAR", "test_value");
        let input = "input_dir = \"${CONDUIT_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "input_dir = \"test_value\"");
        std::env::remove_var("CONDUIT_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("CONDUIT_MISSING_VAR");
        let input = "input_dir = \"${CONDUIT_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("CONDUIT_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("CONDUIT_COMMENTED_VAR");
        let input = "# output_dir = \"${CONDUIT_COMMENTED_VAR}\"\nlog_level = \"info\"";
        assert_eq!(substitute_env_vars(input).unwrap(), input);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(ConduitError::Configuration(_))));
    }

    #[test]
    fn test_load_config_or_default_missing_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        let config = load_config_or_default("nonexistent.toml").unwrap();
        assert_eq!(config.transform.input_dir, "data/input");
    }

    #[test]
    fn test_load_config_valid() {
        let _guard = ENV_LOCK.lock().unwrap();
        let temp_file = write_config(
            r#"
[application]
log_level = "debug"
dry_run = true

[transform]
mapping_config = "config/outbound_config.json"
input_dir = "in"
output_dir = "out"

[logging]
local_rotation = "hourly"
"#,
        );

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert!(config.application.dry_run);
        assert_eq!(config.transform.mapping_config, "config/outbound_config.json");
        assert_eq!(config.logging.local_rotation, "hourly");
    }

    #[test]
    fn test_load_config_invalid_value() {
        let _guard = ENV_LOCK.lock().unwrap();
        let temp_file = write_config("[application]\nlog_level = \"loud\"\n");
        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("Configuration validation failed"));
    }

    #[test]
    fn test_env_override() {
        let _guard = ENV_LOCK.lock().unwrap();
        let temp_file = write_config("[transform]\noutput_dir = \"out\"\n");
        std::env::set_var("CONDUIT_TRANSFORM_OUTPUT_DIR", "override");

        let config = load_config(temp_file.path());
        std::env::remove_var("CONDUIT_TRANSFORM_OUTPUT_DIR");

        assert_eq!(config.unwrap().transform.output_dir, "override");
    }
}
