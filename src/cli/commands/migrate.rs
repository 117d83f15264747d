//! Migrate command implementation
//!
//! Runs the resolve → map → login → save pipeline for one DK report.

use crate::config::load_config;
use crate::core::migrate::{MigrationOrchestrator, MigrationSummary};
use chrono::Utc;
use clap::Args;
use std::path::Path;
use std::time::Instant;

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// DK report to migrate (overrides source.report_name)
    #[arg(short, long)]
    pub report: Option<String>,

    /// Build the definition without contacting Unify
    #[arg(long)]
    pub dry_run: bool,

    /// Write the built definition JSON to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,
}

impl MigrateArgs {
    /// Execute the migrate command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        let report_name = self
            .report
            .clone()
            .unwrap_or_else(|| config.source.report_name.clone());
        let dry_run = self.dry_run || config.application.dry_run;

        let mut orchestrator = match MigrationOrchestrator::from_config(&config) {
            Ok(orchestrator) => orchestrator,
            Err(e) => {
                tracing::error!(error = %e, "Failed to set up migration");
                eprintln!("Failed to initialize migration: {e}");
                return Ok(e.exit_code());
            }
        };

        crate::log_migration_start!(report_name, dry_run);
        if dry_run {
            println!("🔍 DRY RUN MODE - Unify will not be contacted");
            println!();
        }

        let started_at = Utc::now();
        let start = Instant::now();

        let plan = match orchestrator.plan(&report_name).await {
            Ok(plan) => plan,
            Err(e) => {
                eprintln!("Migration failed: {e}");
                return Ok(e.exit_code());
            }
        };

        if let Some(output) = &self.output {
            write_definition(Path::new(output), &plan.definition)?;
            println!("📝 Definition written to {output}");
        }

        let saved = if dry_run {
            None
        } else {
            match orchestrator.submit(&plan).await {
                Ok(saved) => Some(saved),
                Err(e) => {
                    eprintln!("Migration failed: {e}");
                    return Ok(e.exit_code());
                }
            }
        };

        let summary = MigrationSummary::new(&plan, saved.as_ref(), started_at, start.elapsed());
        summary.log_summary();
        print_summary(&summary);

        Ok(0)
    }
}

fn write_definition(
    path: &Path,
    definition: &crate::domain::ReportDefinition,
) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(definition)?;
    std::fs::write(path, json)?;
    tracing::info!(path = %path.display(), "Wrote report definition");
    Ok(())
}

fn print_summary(summary: &MigrationSummary) {
    println!();
    println!("📊 Migration Summary:");
    println!("  Report: {} ({})", summary.report_name, summary.report_id);
    println!("  Batch: {}", summary.batch_id);
    println!("  Rows: {}", summary.row_count);
    println!("  Row Members: {}", summary.member_count);
    println!("  Fingerprint: {}", summary.fingerprint);
    if summary.dry_run {
        println!("  Saved: no (dry run)");
    } else {
        println!(
            "  Unify Report ID: {}",
            summary.saved_report_id.as_deref().unwrap_or("(not returned)")
        );
    }
    println!("  Started: {}", summary.started_at.to_rfc3339());
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();
}
