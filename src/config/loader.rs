//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::BridgeConfig;
use super::secret::secret_string;
use crate::domain::errors::BridgeError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into BridgeConfig
/// 4. Applies environment variable overrides (DKBRIDGE_* prefix)
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
/// use dkbridge::config::loader::load_config;
///
/// let config = load_config("dkbridge.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<BridgeConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(BridgeError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        BridgeError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: BridgeConfig = toml::from_str(&contents)
        .map_err(|e| BridgeError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        BridgeError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| BridgeError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(BridgeError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using DKBRIDGE_* prefix
///
/// Environment variables follow the pattern: DKBRIDGE_<SECTION>_<KEY>
/// For example: DKBRIDGE_UNIFY_BASE_URL, DKBRIDGE_SOURCE_REPORT_NAME
fn apply_env_overrides(config: &mut BridgeConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("DKBRIDGE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("DKBRIDGE_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Source overrides
    if let Ok(val) = std::env::var("DKBRIDGE_SOURCE_REPORT_NAME") {
        config.source.report_name = val;
    }
    if let Ok(val) = std::env::var("DKBRIDGE_SOURCE_BASE_URL") {
        config.source.base_url = Some(val);
    }
    if let Ok(val) = std::env::var("DKBRIDGE_SOURCE_DIRECTORY") {
        config.source.directory = Some(val);
    }
    if let Ok(val) = std::env::var("DKBRIDGE_SOURCE_USERNAME") {
        config.source.username = Some(val);
    }
    if let Ok(val) = std::env::var("DKBRIDGE_SOURCE_PASSWORD") {
        config.source.password = Some(secret_string(val));
    }

    // Unify overrides
    if let Ok(val) = std::env::var("DKBRIDGE_UNIFY_BASE_URL") {
        config.unify.base_url = val;
    }
    if let Ok(val) = std::env::var("DKBRIDGE_UNIFY_USERNAME") {
        config.unify.username = val;
    }
    if let Ok(val) = std::env::var("DKBRIDGE_UNIFY_PASSWORD") {
        config.unify.password = secret_string(val);
    }
    if let Ok(val) = std::env::var("DKBRIDGE_UNIFY_APP_NAME") {
        config.unify.app_name = val;
    }
    if let Ok(val) = std::env::var("DKBRIDGE_UNIFY_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.unify.timeout_seconds = timeout;
        }
    }

    // Mapping overrides
    if let Ok(val) = std::env::var("DKBRIDGE_MAPPING_MODEL_ID") {
        config.mapping.model_id = val;
    }
    if let Ok(val) = std::env::var("DKBRIDGE_MAPPING_CATALOG_PATH") {
        config.mapping.catalog_path = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("DKBRIDGE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("DKBRIDGE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
