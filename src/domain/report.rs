//! Source report and batch records
//!
//! Records returned by the DK source service, and the handles the resolver
//! derives from them.

use super::ids::{BatchId, ReportId};
use serde::{Deserialize, Serialize};

/// One entry of a report lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub report_name: String,
    pub report_id: ReportId,
}

/// One entry of a batch lookup
///
/// The source service returns more fields than DK Bridge uses; they are kept
/// in `extra` so they can be logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRecord {
    pub schedule_event_id: BatchId,

    /// Owning report, when the service reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_id: Option<ReportId>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BatchRecord {
    pub fn new(schedule_event_id: BatchId) -> Self {
        Self {
            schedule_event_id,
            report_id: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Set the owning report
    pub fn with_report_id(mut self, report_id: ReportId) -> Self {
        self.report_id = Some(report_id);
        self
    }
}

/// Identifies the source report selected for migration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportHandle {
    pub report_name: String,
    pub report_id: ReportId,
}

impl From<ReportRecord> for ReportHandle {
    fn from(record: ReportRecord) -> Self {
        Self {
            report_name: record.report_name,
            report_id: record.report_id,
        }
    }
}

/// Identifies the executed batch whose data is migrated
///
/// Only the resolver constructs these, after checking that the batch belongs
/// to `report_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchHandle {
    pub report_id: ReportId,
    pub batch_id: BatchId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_record_keeps_unknown_fields() {
        let json = r#"{"schedule_event_id": 77, "status": "COMPLETE", "rows": 12}"#;
        let record: BatchRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.schedule_event_id.as_str(), "77");
        assert!(record.report_id.is_none());
        assert_eq!(record.extra["status"], "COMPLETE");
    }

    #[test]
    fn test_report_handle_from_record() {
        let record = ReportRecord {
            report_name: "Coffee Sales".to_string(),
            report_id: ReportId::new("R1").unwrap(),
        };
        let handle = ReportHandle::from(record);
        assert_eq!(handle.report_name, "Coffee Sales");
        assert_eq!(handle.report_id.as_str(), "R1");
    }
}
