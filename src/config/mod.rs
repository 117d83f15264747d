//! Configuration management for DK Bridge.
//!
//! DK Bridge reads a TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `DKBRIDGE_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use dkbridge::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("dkbridge.toml")?;
//!
//! println!("Report: {}", config.source.report_name);
//! println!("Unify: {}", config.unify.base_url);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level, dry run
//! - [`SourceConfig`] - DK source service and selection policies
//! - [`UnifyConfig`] - Unify endpoint, credentials and app identity
//! - [`MappingConfig`] - model, row dimension, granularity, catalog, measures
//! - [`LoggingConfig`] - local JSON log files
//!
//! # Example Configuration
//!
//! ```toml
//! [source]
//! kind = "http"
//! report_name = "Coffee Sales"
//! base_url = "https://dk.example.com/api"
//!
//! [unify]
//! base_url = "https://unify.example.com/unify-internal/reportbuilder"
//! username = "migrator"
//! password = "${DKBRIDGE_UNIFY_PASSWORD}"
//! app_name = "DKBridge"
//!
//! [mapping]
//! granularity = "distinct"
//! catalog_path = "catalog/product.toml"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, BridgeConfig, LoggingConfig, MappingConfig, SourceConfig, SourceKind,
    UnifyConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
