//! Migration summary and reporting

use super::MigrationPlan;
use crate::adapters::unify::SavedReport;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// Outcome of one migration run
#[derive(Debug, Clone, Serialize)]
pub struct MigrationSummary {
    pub report_name: String,
    pub report_id: String,
    pub batch_id: String,

    /// Rows in the migrated batch
    pub row_count: usize,

    /// Members placed on the row axis
    pub member_count: usize,

    /// SHA-256 of the submitted definition JSON
    pub fingerprint: String,

    /// Identifier Unify assigned, if any
    pub saved_report_id: Option<String>,

    pub started_at: DateTime<Utc>,
    pub duration: Duration,
    pub dry_run: bool,
}

impl MigrationSummary {
    /// Summarize a plan, and the save result when one was made
    pub fn new(
        plan: &MigrationPlan,
        saved: Option<&SavedReport>,
        started_at: DateTime<Utc>,
        duration: Duration,
    ) -> Self {
        Self {
            report_name: plan.report.report_name.clone(),
            report_id: plan.report.report_id.to_string(),
            batch_id: plan.batch.batch_id.to_string(),
            row_count: plan.row_count,
            member_count: plan.definition.row_members().count(),
            fingerprint: plan.fingerprint.clone(),
            saved_report_id: saved.and_then(|s| s.report_id.clone()),
            started_at,
            duration,
            dry_run: saved.is_none(),
        }
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            report_name = %self.report_name,
            report_id = %self.report_id,
            batch_id = %self.batch_id,
            rows = self.row_count,
            members = self.member_count,
            fingerprint = %self.fingerprint,
            saved_report_id = ?self.saved_report_id,
            duration_ms = self.duration.as_millis() as u64,
            dry_run = self.dry_run,
            "Migration completed"
        );
    }
}
