//! Migration pipeline
//!
//! - [`orchestrator`] - resolve → map → login → save
//! - [`summary`] - per-run summary

pub mod orchestrator;
pub mod summary;

pub use orchestrator::MigrationOrchestrator;
pub use summary::MigrationSummary;

use crate::domain::{BatchHandle, ReportDefinition, ReportHandle};

/// A built definition ready for submission
#[derive(Debug, Clone)]
pub struct MigrationPlan {
    pub report: ReportHandle,
    pub batch: BatchHandle,

    /// Rows in the source batch
    pub row_count: usize,

    pub definition: ReportDefinition,

    /// SHA-256 of `definition`'s JSON
    pub fingerprint: String,
}
