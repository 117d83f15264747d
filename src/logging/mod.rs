//! Logging and observability
//!
//! Structured logging through `tracing`, with:
//! - Configurable log levels (`RUST_LOG` overrides)
//! - Console output
//! - Optional JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use dkbridge::logging::init_logging;
//! use dkbridge::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(report_name = "Coffee Sales", "Starting migration");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a migration run
///
/// # Example
///
/// ```no_run
/// use dkbridge::log_migration_start;
///
/// log_migration_start!("Coffee Sales", false);
/// ```
#[macro_export]
macro_rules! log_migration_start {
    ($report_name:expr, $dry_run:expr) => {
        tracing::info!(
            report_name = %$report_name,
            dry_run = $dry_run,
            "Starting migration"
        );
    };
}

/// Log a pipeline stage failure
///
/// # Example
///
/// ```no_run
/// use dkbridge::log_stage_failure;
/// use dkbridge::domain::{Stage, UnifyError};
///
/// let error = UnifyError::NotAuthenticated;
/// log_stage_failure!(Stage::Save, &error);
/// ```
#[macro_export]
macro_rules! log_stage_failure {
    ($stage:expr, $error:expr) => {
        tracing::error!(
            stage = %$stage,
            error = %$error,
            "Migration stage failed"
        );
    };
}
