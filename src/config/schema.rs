//! Configuration schema types
//!
//! This module defines the configuration structure for DK Bridge.

use crate::config::SecretString;
use crate::core::mapping::MemberGranularity;
use crate::core::resolve::SelectionPolicy;
use crate::domain::MeasureSpec;
use serde::{Deserialize, Serialize};

/// Main DK Bridge configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// DK source service settings
    pub source: SourceConfig,

    /// Unify target platform settings
    pub unify: UnifyConfig,

    /// Payload mapping settings
    pub mapping: MappingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BridgeConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.source.validate()?;
        self.unify.validate()?;
        self.mapping.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (build the definition, never contact Unify)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Where the DK batch data comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// DK report service REST endpoints
    Http,
    /// Local DK export directory
    Directory,
}

/// DK source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Source implementation
    pub kind: SourceKind,

    /// Name of the DK report to migrate
    pub report_name: String,

    /// Base URL of the DK report service (kind = "http")
    #[serde(default)]
    pub base_url: Option<String>,

    /// Export directory (kind = "directory")
    #[serde(default)]
    pub directory: Option<String>,

    /// Username for the DK report service (optional)
    #[serde(default)]
    pub username: Option<String>,

    /// Password for the DK report service (optional)
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub password: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// How to pick among reports sharing the requested name
    #[serde(default)]
    pub report_selection: SelectionPolicy,

    /// How to pick among the report's executed batches
    #[serde(default)]
    pub batch_selection: SelectionPolicy,
}

impl SourceConfig {
    fn validate(&self) -> Result<(), String> {
        if self.report_name.trim().is_empty() {
            return Err("source.report_name cannot be empty".to_string());
        }

        match self.kind {
            SourceKind::Http => {
                let base_url = self.base_url.as_deref().unwrap_or_default();
                if base_url.is_empty() {
                    return Err("source.base_url is required when kind = 'http'".to_string());
                }
                validate_http_url("source.base_url", base_url)?;
            }
            SourceKind::Directory => {
                if self.directory.as_deref().map(str::is_empty).unwrap_or(true) {
                    return Err(
                        "source.directory is required when kind = 'directory'".to_string()
                    );
                }
            }
        }

        if self.username.is_some() != self.password.is_some() {
            return Err(
                "source.username and source.password must be provided together".to_string(),
            );
        }

        if self.timeout_seconds == 0 {
            return Err("source.timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }
}

/// Unify target platform configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifyConfig {
    /// Base URL of the Unify report builder API
    pub base_url: String,

    /// Username for Basic authentication
    pub username: String,

    /// Password for Basic authentication
    /// Stored securely in memory and automatically zeroized on drop
    pub password: SecretString,

    /// Application identity sent with the login call
    pub app_name: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// TLS certificate verification enabled
    ///
    /// Only disable for test platforms with self-signed certificates.
    #[serde(default = "default_true")]
    pub tls_verify: bool,
}

impl UnifyConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        validate_http_url("unify.base_url", &self.base_url)?;

        if self.username.trim().is_empty() {
            return Err("unify.username cannot be empty".to_string());
        }

        if self.password.expose_secret().is_empty() {
            return Err("unify.password cannot be empty".to_string());
        }

        if self.app_name.trim().is_empty() {
            return Err("unify.app_name cannot be empty".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("unify.timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }
}

/// Payload mapping configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Unify model the definition targets
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// Dimension placed on the row axis
    #[serde(default = "default_row_dimension")]
    pub row_dimension: String,

    /// Dataset column holding the row dimension labels
    #[serde(default = "default_dimension_column")]
    pub dimension_column: String,

    /// Optional dataset column holding the label's ancestor chain,
    /// used to tell apart nodes sharing a leaf name
    #[serde(default)]
    pub path_column: Option<String>,

    /// One member per distinct node, or one per dataset row. No default.
    pub granularity: MemberGranularity,

    /// TOML file listing the target hierarchy nodes
    pub catalog_path: String,

    /// Measures selected on the column axis
    #[serde(default = "default_measures")]
    pub measures: Vec<MeasureSpec>,
}

impl MappingConfig {
    fn validate(&self) -> Result<(), String> {
        for (field, value) in [
            ("mapping.model_id", &self.model_id),
            ("mapping.row_dimension", &self.row_dimension),
            ("mapping.dimension_column", &self.dimension_column),
            ("mapping.catalog_path", &self.catalog_path),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{field} cannot be empty"));
            }
        }

        if let Some(path_column) = &self.path_column {
            if path_column.trim().is_empty() {
                return Err("mapping.path_column cannot be blank when set".to_string());
            }
        }

        if self.measures.is_empty() {
            return Err("mapping.measures must list at least one measure".to_string());
        }

        for (i, measure) in self.measures.iter().enumerate() {
            if measure.id.trim().is_empty() {
                return Err(format!("mapping.measures[{i}].id cannot be empty"));
            }
            if measure.folder.trim().is_empty() || measure.name.trim().is_empty() {
                return Err(format!(
                    "mapping.measures[{i}] folder and name cannot be empty"
                ));
            }
            if measure.folder.contains('.') || measure.name.contains('.') {
                return Err(format!(
                    "mapping.measures[{i}] folder and name cannot contain '.'"
                ));
            }
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn validate_http_url(field: &str, value: &str) -> Result<(), String> {
    if !value.starts_with("http://") && !value.starts_with("https://") {
        return Err(format!("{field} must start with http:// or https://"));
    }
    url::Url::parse(value).map_err(|e| format!("{field} is not a valid URL: {e}"))?;
    Ok(())
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_model_id() -> String {
    "1100".to_string()
}

fn default_row_dimension() -> String {
    "Product".to_string()
}

fn default_dimension_column() -> String {
    "category".to_string()
}

fn default_measures() -> Vec<MeasureSpec> {
    vec![MeasureSpec::default()]
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[source]
kind = "http"
report_name = "Coffee Sales"
base_url = "https://dk.example.com/api"

[unify]
base_url = "https://unify.example.com/reportbuilder"
username = "migrator"
password = "hunter2"
app_name = "DKBridge"

[mapping]
granularity = "distinct"
catalog_path = "catalog.toml"
"#;

    fn minimal() -> BridgeConfig {
        toml::from_str(MINIMAL).unwrap()
    }

    #[test]
    fn test_minimal_config_defaults() {
        let config = minimal();
        assert!(config.validate().is_ok());
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.source.report_selection, SelectionPolicy::First);
        assert_eq!(config.unify.timeout_seconds, 60);
        assert!(config.unify.tls_verify);
        assert_eq!(config.mapping.model_id, "1100");
        assert_eq!(config.mapping.row_dimension, "Product");
        assert_eq!(config.mapping.measures, vec![MeasureSpec::default()]);
        assert!(!config.logging.local_enabled);
    }

    #[test]
    fn test_granularity_is_required() {
        let without = MINIMAL.replace("granularity = \"distinct\"\n", "");
        assert!(toml::from_str::<BridgeConfig>(&without).is_err());
    }

    #[test]
    fn test_http_source_requires_base_url() {
        let mut config = minimal();
        config.source.base_url = None;
        assert!(config.validate().unwrap_err().contains("source.base_url"));
    }

    #[test]
    fn test_directory_source_requires_directory() {
        let mut config = minimal();
        config.source.kind = SourceKind::Directory;
        assert!(config.validate().unwrap_err().contains("source.directory"));

        config.source.directory = Some("/srv/dk-export".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unify_base_url_scheme() {
        let mut config = minimal();
        config.unify.base_url = "ftp://unify.example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_password_rejected() {
        let mut config = minimal();
        config.unify.password = crate::config::secret_string(String::new());
        assert!(config.validate().unwrap_err().contains("unify.password"));
    }

    #[test]
    fn test_measures_cannot_be_empty() {
        let mut config = minimal();
        config.mapping.measures.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_measure_name_with_period_rejected() {
        let mut config = minimal();
        config.mapping.measures[0].name = "Units.Sold".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = minimal();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_rotation() {
        let mut config = minimal();
        config.logging.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }
}
