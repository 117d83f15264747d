//! Migration orchestrator
//!
//! Runs resolve → map → login → save for one report. Stages run strictly in
//! order; the first failure stops the run and nothing is rolled back.

use super::MigrationPlan;
use crate::adapters::hierarchy::StaticHierarchyCatalog;
use crate::adapters::source::create_source;
use crate::adapters::unify::{SavedReport, UnifySession};
use crate::config::BridgeConfig;
use crate::core::mapping::PayloadMapper;
use crate::core::resolve::ReportResolver;
use crate::domain::{BridgeError, MigrationError, Result, Stage};
use std::sync::Arc;

/// Drives one report through the migration pipeline
pub struct MigrationOrchestrator {
    resolver: ReportResolver,
    mapper: PayloadMapper,
    session: UnifySession,
}

impl MigrationOrchestrator {
    pub fn new(resolver: ReportResolver, mapper: PayloadMapper, session: UnifySession) -> Self {
        Self {
            resolver,
            mapper,
            session,
        }
    }

    /// Wire every component from configuration
    ///
    /// Loads the hierarchy catalog and builds the source and Unify clients.
    /// No network call is made.
    pub fn from_config(config: &BridgeConfig) -> Result<Self> {
        let source = create_source(&config.source)?;
        let resolver = ReportResolver::new(
            source,
            config.source.report_selection,
            config.source.batch_selection,
        );

        let catalog = StaticHierarchyCatalog::from_file(&config.mapping.catalog_path)
            .map_err(|e| BridgeError::Configuration(e.to_string()))?;
        let mapper = PayloadMapper::new(config.mapping.clone(), Arc::new(catalog));

        let session = UnifySession::new(&config.unify)?;

        Ok(Self::new(resolver, mapper, session))
    }

    pub fn session(&self) -> &UnifySession {
        &self.session
    }

    /// Resolve and map, without contacting Unify
    ///
    /// # Errors
    ///
    /// [`MigrationError`] tagged `resolve` or `map`.
    pub async fn plan(
        &self,
        report_name: &str,
    ) -> std::result::Result<MigrationPlan, MigrationError> {
        tracing::info!(report_name = %report_name, "Planning migration");

        let resolved = self
            .resolver
            .resolve(report_name)
            .await
            .map_err(|e| stage_failed(Stage::Resolve, e))?;

        let definition = self
            .mapper
            .build(&resolved.report.report_name, &resolved.dataset)
            .map_err(|e| stage_failed(Stage::Map, e))?;

        let fingerprint = definition
            .fingerprint()
            .map_err(|e| stage_failed(Stage::Map, BridgeError::from(e)))?;

        tracing::info!(
            report_name = %resolved.report.report_name,
            members = definition.row_members().count(),
            fingerprint = %fingerprint,
            "Built report definition"
        );

        Ok(MigrationPlan {
            row_count: resolved.dataset.len(),
            report: resolved.report,
            batch: resolved.batch,
            definition,
            fingerprint,
        })
    }

    /// Log in and save a planned definition
    ///
    /// # Errors
    ///
    /// [`MigrationError`] tagged `login` or `save`.
    pub async fn submit(
        &mut self,
        plan: &MigrationPlan,
    ) -> std::result::Result<SavedReport, MigrationError> {
        self.session
            .login()
            .await
            .map_err(|e| stage_failed(Stage::Login, e))?;

        self.session
            .save(&plan.definition)
            .await
            .map_err(|e| stage_failed(Stage::Save, e))
    }

    /// Migrate `report_name` end to end
    pub async fn run(
        &mut self,
        report_name: &str,
    ) -> std::result::Result<SavedReport, MigrationError> {
        let plan = self.plan(report_name).await?;
        self.submit(&plan).await
    }
}

fn stage_failed(stage: Stage, error: impl Into<BridgeError>) -> MigrationError {
    let error = MigrationError::new(stage, error);
    crate::log_stage_failure!(stage, error.source);
    error
}
