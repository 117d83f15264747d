//! Domain models and types for DK Bridge.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`ReportId`], [`BatchId`])
//! - **Source records and handles** ([`ReportRecord`], [`BatchRecord`],
//!   [`ReportHandle`], [`BatchHandle`])
//! - **Batch data** ([`Dataset`], [`SourceRow`])
//! - **The Unify wire model** ([`ReportDefinition`], [`DimensionAxis`], [`DimensionMember`])
//! - **Hierarchy nodes and measures** ([`HierarchyNode`], [`MeasureSpec`])
//! - **Error types** ([`BridgeError`], [`SourceError`], [`MappingError`],
//!   [`UnifyError`], [`MigrationError`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, BridgeError>`]:
//!
//! ```rust
//! use dkbridge::domain::{BridgeError, Result, SourceError};
//!
//! fn example() -> Result<()> {
//!     let lookup: std::result::Result<(), SourceError> =
//!         Err(SourceError::ReportNotFound("Coffee Sales".to_string()));
//!     // Errors are automatically converted using the ? operator
//!     lookup?;
//!     Ok(())
//! }
//!
//! assert!(matches!(example(), Err(BridgeError::Source(_))));
//! ```

pub mod dataset;
pub mod definition;
pub mod errors;
pub mod hierarchy;
pub mod ids;
pub mod report;
pub mod result;

// Re-export commonly used types for convenience
pub use dataset::{Dataset, SourceRow};
pub use definition::{
    DimensionAxis, DimensionMember, GridLayout, ReportDefinition, MEASURES_AXIS,
};
pub use errors::{BridgeError, MappingError, MigrationError, SourceError, Stage, UnifyError};
pub use hierarchy::{HierarchyNode, MeasureSpec};
pub use ids::{BatchId, ReportId};
pub use report::{BatchHandle, BatchRecord, ReportHandle, ReportRecord};
pub use result::Result;
