//! Domain error types
//!
//! This module defines the error hierarchy for DK Bridge. Errors are grouped by
//! the collaborator that raises them (source service, payload mapper, Unify
//! session) and roll up into [`BridgeError`]. None of them expose third-party
//! client types.

use std::fmt;
use thiserror::Error;

/// Main DK Bridge error type
///
/// This is the primary error type used throughout the application.
/// It wraps the collaborator-specific error types and adds the ambient
/// categories (configuration, I/O, serialization).
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Source data service errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Payload mapping errors
    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    /// Unify platform errors
    #[error("Unify error: {0}")]
    Unify(#[from] UnifyError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Source data service errors
///
/// Raised while resolving a report name to a batch and fetching its data.
#[derive(Debug, Error)]
pub enum SourceError {
    /// No report matches the requested name
    #[error("No report found with name: {0}")]
    ReportNotFound(String),

    /// The report has no executed batches
    #[error("No batches found for report ID: {0}")]
    BatchNotFound(String),

    /// More than one candidate matched under the `unique` selection policy
    #[error("Ambiguous {what}: {count} candidates match")]
    Ambiguous { what: String, count: usize },

    /// The service could not be reached or answered with an error
    #[error("Source service unavailable: {0}")]
    Unavailable(String),

    /// The service answered, but the payload is not usable
    #[error("Malformed dataset: {0}")]
    MalformedDataset(String),
}

impl SourceError {
    /// True for the "report or batch does not exist" family
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SourceError::ReportNotFound(_) | SourceError::BatchNotFound(_)
        )
    }
}

/// Payload mapping errors
#[derive(Debug, Error)]
pub enum MappingError {
    /// A dimension label has no corresponding hierarchy node
    #[error("Cannot map dimension label '{label}': {reason}")]
    UnmappableDimension { label: String, reason: String },

    /// A configured column is absent from the dataset header
    #[error("Dataset has no column named '{0}'")]
    MissingColumn(String),

    /// The dataset carries no rows to build members from
    #[error("Dataset contains no rows")]
    EmptyDataset,

    /// The hierarchy catalog could not be loaded
    #[error("Hierarchy catalog error: {0}")]
    Catalog(String),
}

/// Unify platform errors
///
/// Errors that occur while talking to the Unify report builder API.
#[derive(Debug, Error)]
pub enum UnifyError {
    /// Login was rejected or could not be performed
    #[error("Authentication failed: {message}")]
    AuthenticationFailed {
        status: Option<u16>,
        message: String,
    },

    /// An authenticated call was attempted before a successful login
    #[error("Session is not authenticated; call login() first")]
    NotAuthenticated,

    /// The platform rejected the report definition
    #[error("Save rejected with status {status}: {body}")]
    SaveRejected { status: u16, body: String },

    /// Transport-level failure
    #[error("Failed to connect to Unify: {0}")]
    Connection(String),

    /// The platform answered 2xx with an unusable body
    #[error("Invalid response from Unify: {0}")]
    InvalidResponse(String),
}

/// Pipeline stage a migration failure originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolve,
    Map,
    Login,
    Save,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Resolve => "resolve",
            Stage::Map => "map",
            Stage::Login => "login",
            Stage::Save => "save",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed migration run, tagged with the stage that failed
#[derive(Debug, Error)]
#[error("{stage} stage failed: {source}")]
pub struct MigrationError {
    pub stage: Stage,
    #[source]
    pub source: BridgeError,
}

impl MigrationError {
    pub fn new(stage: Stage, source: impl Into<BridgeError>) -> Self {
        Self {
            stage,
            source: source.into(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.source.exit_code()
    }
}

impl BridgeError {
    /// Process exit code for this error
    ///
    /// 2 configuration, 3 source or mapping, 4 authentication or connection,
    /// 5 save rejected and anything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            BridgeError::Configuration(_) => 2,
            BridgeError::Source(_) | BridgeError::Mapping(_) | BridgeError::Validation(_) => 3,
            BridgeError::Unify(
                UnifyError::AuthenticationFailed { .. }
                | UnifyError::NotAuthenticated
                | UnifyError::Connection(_),
            ) => 4,
            BridgeError::Unify(UnifyError::SaveRejected { .. } | UnifyError::InvalidResponse(_))
            | BridgeError::Serialization(_)
            | BridgeError::Io(_) => 5,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        BridgeError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for BridgeError {
    fn from(err: toml::de::Error) -> Self {
        BridgeError::Configuration(format!("TOML parse error: {err}"))
    }
}
