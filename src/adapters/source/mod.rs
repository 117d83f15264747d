//! DK source service adapters

pub mod directory;
pub mod http;
pub mod traits;

pub use directory::DirectorySourceService;
pub use http::HttpSourceService;
pub use traits::{DataFormat, SourceDataService};

use crate::config::{SourceConfig, SourceKind};
use crate::domain::{BridgeError, Result};
use std::sync::Arc;

/// Build the source service selected by `source.kind`
///
/// # Errors
///
/// Returns a configuration error when the selected kind is missing its
/// location setting.
pub fn create_source(config: &SourceConfig) -> Result<Arc<dyn SourceDataService>> {
    let source: Arc<dyn SourceDataService> = match config.kind {
        SourceKind::Http => Arc::new(HttpSourceService::new(config)?),
        SourceKind::Directory => {
            let directory = config.directory.as_deref().ok_or_else(|| {
                BridgeError::Configuration(
                    "source.directory is required for the directory source".to_string(),
                )
            })?;
            Arc::new(DirectorySourceService::new(directory))
        }
    };

    tracing::debug!(kind = ?config.kind, location = source.location(), "Created DK source");
    Ok(source)
}
