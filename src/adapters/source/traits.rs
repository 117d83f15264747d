//! DK source service trait definition
//!
//! The `SourceDataService` trait abstracts where DK report metadata and batch
//! data come from, so the resolver can run against the DK REST service, an
//! export directory, or an in-memory fixture.

use crate::domain::ids::{BatchId, ReportId};
use crate::domain::{BatchRecord, Dataset, ReportRecord, SourceError};
use async_trait::async_trait;
use std::fmt;

/// Serialization requested from the service for batch data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataFormat {
    /// Comma-delimited with a header row
    #[default]
    Csv,
}

impl DataFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for DK source service implementations
///
/// Lookups return the service's lists as-is, in service order; empty lists
/// are not errors at this level. Any failure to reach the service or to decode
/// its answer is a [`SourceError::Unavailable`] or
/// [`SourceError::MalformedDataset`].
///
/// # Example
///
/// ```no_run
/// use dkbridge::adapters::source::{DataFormat, SourceDataService};
///
/// # use dkbridge::domain::SourceError;
/// # async fn example(source: &dyn SourceDataService) -> Result<(), SourceError> {
/// let reports = source.lookup_reports("Coffee Sales").await?;
/// if let Some(report) = reports.first() {
///     let batches = source.lookup_batches(&report.report_id).await?;
///     if let Some(batch) = batches.first() {
///         let dataset = source.fetch_data(&batch.schedule_event_id, DataFormat::Csv).await?;
///         println!("{} rows", dataset.len());
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait SourceDataService: Send + Sync {
    /// All reports registered under `name`
    async fn lookup_reports(&self, name: &str) -> Result<Vec<ReportRecord>, SourceError>;

    /// All executed batches of a report
    async fn lookup_batches(&self, report_id: &ReportId) -> Result<Vec<BatchRecord>, SourceError>;

    /// Tabular output of one batch
    async fn fetch_data(&self, batch_id: &BatchId, format: DataFormat)
        -> Result<Dataset, SourceError>;

    /// Where the data comes from, for logs
    fn location(&self) -> &str;
}
