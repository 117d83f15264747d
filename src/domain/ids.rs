//! Domain identifier types with validation
//!
//! Newtype wrappers for the identifiers handed out by the DK source service.
//! Keeping report and batch identifiers apart at the type level stops a batch
//! id from being passed where a report id is expected.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// DK report identifier
///
/// # Examples
///
/// ```
/// use dkbridge::domain::ids::ReportId;
/// use std::str::FromStr;
///
/// let report_id = ReportId::from_str("R1").unwrap();
/// assert_eq!(report_id.as_str(), "R1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ReportId(String);

impl ReportId {
    /// Creates a new ReportId, rejecting blank values
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Report ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the report ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReportId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ReportId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ReportId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = string_or_number(deserializer)?;
        ReportId::new(raw).map_err(serde::de::Error::custom)
    }
}

/// DK batch identifier (the `schedule_event_id` of an executed report run)
///
/// # Examples
///
/// ```
/// use dkbridge::domain::ids::BatchId;
///
/// let batch_id = BatchId::new("B1").unwrap();
/// assert_eq!(batch_id.to_string(), "B1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BatchId(String);

impl BatchId {
    /// Creates a new BatchId, rejecting blank values
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Batch ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the batch ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BatchId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for BatchId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for BatchId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = string_or_number(deserializer)?;
        BatchId::new(raw).map_err(serde::de::Error::custom)
    }
}

/// DK hands identifiers out as either JSON strings or integers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_id_valid() {
        let id = ReportId::new("R1").unwrap();
        assert_eq!(id.as_str(), "R1");
        assert_eq!(id.to_string(), "R1");
    }

    #[test]
    fn test_report_id_empty() {
        assert!(ReportId::new("").is_err());
        assert!(ReportId::new("   ").is_err());
    }

    #[test]
    fn test_batch_id_empty() {
        assert!(BatchId::from_str("").is_err());
    }

    #[test]
    fn test_ids_deserialize_from_string_or_number() {
        let from_text: ReportId = serde_json::from_str(r#""R1""#).unwrap();
        let from_int: BatchId = serde_json::from_str("90210").unwrap();
        assert_eq!(from_text.as_str(), "R1");
        assert_eq!(from_int.as_str(), "90210");
    }

    #[test]
    fn test_ids_reject_blank_on_deserialize() {
        assert!(serde_json::from_str::<BatchId>(r#""""#).is_err());
    }
}
