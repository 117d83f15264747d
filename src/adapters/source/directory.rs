//! DK export directory adapter
//!
//! Reads a DK export laid out on disk:
//!
//! ```text
//! <directory>/
//!   reports.json                 [{"report_name", "report_id"}, ...]
//!   batches/<report_id>.json     [{"schedule_event_id", ...}, ...]
//!   data/<batch_id>.csv          batch output
//! ```
//!
//! A report without a batches file has no batches.

use super::{DataFormat, SourceDataService};
use crate::domain::ids::{BatchId, ReportId};
use crate::domain::{BatchRecord, Dataset, ReportRecord, SourceError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Export-directory implementation of [`SourceDataService`]
pub struct DirectorySourceService {
    root: PathBuf,
    location: String,
}

impl DirectorySourceService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            location: root.display().to_string(),
            root,
        }
    }

    async fn read(&self, path: &Path) -> Result<Option<String>, SourceError> {
        match tokio::fs::read_to_string(path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SourceError::Unavailable(format!(
                "Failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>, SourceError> {
        let Some(text) = self.read(path).await? else {
            return Ok(None);
        };
        serde_json::from_str(&text).map(Some).map_err(|e| {
            SourceError::Unavailable(format!("Invalid JSON in {}: {e}", path.display()))
        })
    }
}

/// Identifiers become file names; anything that could escape the directory is refused.
fn file_stem(id: &str) -> Result<&str, SourceError> {
    if id.contains(['/', '\\']) || id == "." || id == ".." {
        return Err(SourceError::Unavailable(format!(
            "identifier '{id}' cannot be used as a file name"
        )));
    }
    Ok(id)
}

#[async_trait]
impl SourceDataService for DirectorySourceService {
    async fn lookup_reports(&self, name: &str) -> Result<Vec<ReportRecord>, SourceError> {
        let path = self.root.join("reports.json");
        let reports: Vec<ReportRecord> = self.read_json(&path).await?.ok_or_else(|| {
            SourceError::Unavailable(format!("{} does not exist", path.display()))
        })?;

        Ok(reports
            .into_iter()
            .filter(|r| r.report_name == name)
            .collect())
    }

    async fn lookup_batches(&self, report_id: &ReportId) -> Result<Vec<BatchRecord>, SourceError> {
        let path = self
            .root
            .join("batches")
            .join(format!("{}.json", file_stem(report_id.as_str())?));
        Ok(self.read_json(&path).await?.unwrap_or_default())
    }

    async fn fetch_data(
        &self,
        batch_id: &BatchId,
        format: DataFormat,
    ) -> Result<Dataset, SourceError> {
        let path = self.root.join("data").join(format!(
            "{}.{}",
            file_stem(batch_id.as_str())?,
            format.as_str()
        ));
        let text = self.read(&path).await?.ok_or_else(|| {
            SourceError::Unavailable(format!("batch data {} does not exist", path.display()))
        })?;

        match format {
            DataFormat::Csv => Dataset::from_csv(&text),
        }
    }

    fn location(&self) -> &str {
        &self.location
    }
}
