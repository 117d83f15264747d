//! Shared fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use dkbridge::adapters::source::{DataFormat, SourceDataService};
use dkbridge::config::{secret_string, MappingConfig, UnifyConfig};
use dkbridge::core::mapping::MemberGranularity;
use dkbridge::domain::{
    BatchId, BatchRecord, Dataset, MeasureSpec, ReportId, ReportRecord, SourceError,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const CATALOG: &str = r#"
[[nodes]]
dimension = "Product"
hierarchy = "Standard Hierarchy"
level = "SubCategory"
ids = [4527492, 3506828, 3506829, 3506762, 3506881, 6124292]
names = ["TOTAL STORE", "EDIBLE", "DEPT-BEVERAGES", "AISLE-COFFEE & TEA", "COFFEE", "COFFEE ADDITIVE/FLAVORING"]

[[nodes]]
dimension = "Product"
hierarchy = "Standard Hierarchy"
level = "SubCategory"
ids = [4527492, 3506828, 3506829, 3506762, 3506881, 6124300]
names = ["TOTAL STORE", "EDIBLE", "DEPT-BEVERAGES", "AISLE-COFFEE & TEA", "COFFEE", "GROUND COFFEE"]
"#;

/// In-memory DK source that counts calls
#[derive(Default)]
pub struct FixtureSource {
    pub reports: Vec<ReportRecord>,
    pub batches: HashMap<String, Vec<BatchRecord>>,
    pub data: HashMap<String, String>,
    pub unavailable: bool,
    pub report_lookups: AtomicUsize,
    pub batch_lookups: AtomicUsize,
    pub data_fetches: AtomicUsize,
}

impl FixtureSource {
    /// "Coffee Sales" (R1) with one batch (B1) and one data row
    pub fn coffee_sales() -> Self {
        Self::default()
            .with_report("Coffee Sales", "R1")
            .with_batch("R1", "B1")
            .with_data("B1", "category,sales\nCOFFEE ADDITIVE/FLAVORING,1000\n")
    }

    pub fn with_report(mut self, name: &str, id: &str) -> Self {
        self.reports.push(ReportRecord {
            report_name: name.to_string(),
            report_id: ReportId::new(id).unwrap(),
        });
        self
    }

    pub fn with_batch(mut self, report_id: &str, batch_id: &str) -> Self {
        self.batches
            .entry(report_id.to_string())
            .or_default()
            .push(BatchRecord::new(BatchId::new(batch_id).unwrap()));
        self
    }

    pub fn with_data(mut self, batch_id: &str, csv: &str) -> Self {
        self.data.insert(batch_id.to_string(), csv.to_string());
        self
    }

    pub fn calls(&self) -> (usize, usize, usize) {
        (
            self.report_lookups.load(Ordering::SeqCst),
            self.batch_lookups.load(Ordering::SeqCst),
            self.data_fetches.load(Ordering::SeqCst),
        )
    }

    fn check_available(&self) -> Result<(), SourceError> {
        if self.unavailable {
            return Err(SourceError::Unavailable("fixture offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SourceDataService for FixtureSource {
    async fn lookup_reports(&self, name: &str) -> Result<Vec<ReportRecord>, SourceError> {
        self.report_lookups.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self
            .reports
            .iter()
            .filter(|r| r.report_name == name)
            .cloned()
            .collect())
    }

    async fn lookup_batches(&self, report_id: &ReportId) -> Result<Vec<BatchRecord>, SourceError> {
        self.batch_lookups.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self
            .batches
            .get(report_id.as_str())
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_data(
        &self,
        batch_id: &BatchId,
        format: DataFormat,
    ) -> Result<Dataset, SourceError> {
        self.data_fetches.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        assert_eq!(format, DataFormat::Csv);
        let csv = self
            .data
            .get(batch_id.as_str())
            .ok_or_else(|| SourceError::Unavailable(format!("no data for {batch_id}")))?;
        Dataset::from_csv(csv)
    }

    fn location(&self) -> &str {
        "fixture"
    }
}

pub fn mapping_config(granularity: MemberGranularity) -> MappingConfig {
    MappingConfig {
        model_id: "1100".to_string(),
        row_dimension: "Product".to_string(),
        dimension_column: "category".to_string(),
        path_column: None,
        granularity,
        catalog_path: "catalog.toml".to_string(),
        measures: vec![MeasureSpec::default()],
    }
}

pub fn unify_config(base_url: &str) -> UnifyConfig {
    UnifyConfig {
        base_url: base_url.to_string(),
        username: "migrator".to_string(),
        password: secret_string("hunter2".to_string()),
        app_name: "DKBridge".to_string(),
        timeout_seconds: 5,
        tls_verify: true,
    }
}
