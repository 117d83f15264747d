//! Source report resolver
//!
//! Turns a report name into the report, the batch to migrate, and that batch's
//! data, using the configured selection policies.

use super::SelectionPolicy;
use crate::adapters::source::{DataFormat, SourceDataService};
use crate::domain::{BatchHandle, Dataset, ReportHandle, SourceError};
use std::sync::Arc;

/// Everything the mapper needs from the source side
#[derive(Debug, Clone)]
pub struct ResolvedReport {
    pub report: ReportHandle,
    pub batch: BatchHandle,
    pub dataset: Dataset,
}

/// Resolves report names against a [`SourceDataService`]
pub struct ReportResolver {
    source: Arc<dyn SourceDataService>,
    report_policy: SelectionPolicy,
    batch_policy: SelectionPolicy,
}

impl ReportResolver {
    pub fn new(
        source: Arc<dyn SourceDataService>,
        report_policy: SelectionPolicy,
        batch_policy: SelectionPolicy,
    ) -> Self {
        Self {
            source,
            report_policy,
            batch_policy,
        }
    }

    /// Find the report registered under `report_name`
    ///
    /// # Errors
    ///
    /// - [`SourceError::ReportNotFound`] when nothing matches
    /// - [`SourceError::Ambiguous`] when the policy is `unique` and several match
    /// - [`SourceError::Unavailable`] when the service fails
    pub async fn find_report(&self, report_name: &str) -> Result<ReportHandle, SourceError> {
        let reports = self.source.lookup_reports(report_name).await?;
        tracing::debug!(
            report_name = %report_name,
            candidates = reports.len(),
            policy = %self.report_policy,
            "Looked up reports"
        );

        let report = self
            .report_policy
            .select("report", reports)?
            .ok_or_else(|| SourceError::ReportNotFound(report_name.to_string()))?;

        Ok(ReportHandle::from(report))
    }

    /// Pick the batch of `report` to migrate
    ///
    /// # Errors
    ///
    /// - [`SourceError::BatchNotFound`] when the report has no batches
    /// - [`SourceError::MalformedDataset`] when the selected batch names a
    ///   different owning report
    pub async fn find_batch(&self, report: &ReportHandle) -> Result<BatchHandle, SourceError> {
        let batches = self.source.lookup_batches(&report.report_id).await?;
        tracing::debug!(
            report_id = %report.report_id,
            candidates = batches.len(),
            policy = %self.batch_policy,
            "Looked up batches"
        );

        let batch = self
            .batch_policy
            .select("batch", batches)?
            .ok_or_else(|| SourceError::BatchNotFound(report.report_id.to_string()))?;

        if let Some(owner) = &batch.report_id {
            if owner != &report.report_id {
                return Err(SourceError::MalformedDataset(format!(
                    "batch {} belongs to report {owner}, not {}",
                    batch.schedule_event_id, report.report_id
                )));
            }
        }

        Ok(BatchHandle {
            report_id: report.report_id.clone(),
            batch_id: batch.schedule_event_id,
        })
    }

    /// Resolve a report name to its batch and data
    pub async fn resolve(&self, report_name: &str) -> Result<ResolvedReport, SourceError> {
        let report = self.find_report(report_name).await?;
        tracing::info!(
            report_name = %report.report_name,
            report_id = %report.report_id,
            "Found report"
        );

        let batch = self.find_batch(&report).await?;
        tracing::info!(batch_id = %batch.batch_id, "Using batch");

        let dataset = self.source.fetch_data(&batch.batch_id, DataFormat::Csv).await?;
        tracing::info!(
            batch_id = %batch.batch_id,
            rows = dataset.len(),
            columns = dataset.columns().len(),
            "Fetched batch data"
        );

        Ok(ResolvedReport {
            report,
            batch,
            dataset,
        })
    }
}
