//! Save response document

use serde::Serialize;
use serde_json::Value;

/// What Unify answered to a successful `saveReport`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedReport {
    /// Identifier the platform assigned, when the response carries one
    pub report_id: Option<String>,

    /// Response body as returned (`null` for an empty body)
    pub response: Value,
}

impl SavedReport {
    pub fn from_response(response: Value) -> Self {
        let report_id = extract_report_id(&response);
        Self {
            report_id,
            response,
        }
    }
}

fn extract_report_id(response: &Value) -> Option<String> {
    let object = response.as_object()?;
    ["reportId", "id", "report_id"]
        .iter()
        .find_map(|key| match object.get(*key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!({"reportId": "R-900"}), Some("R-900") ; "camel case string")]
    #[test_case(json!({"id": 4512}), Some("4512") ; "numeric id")]
    #[test_case(json!({"report_id": "x", "status": "ok"}), Some("x") ; "snake case")]
    #[test_case(json!({"reportId": "", "id": 7}), Some("7") ; "blank falls through")]
    #[test_case(json!({"status": "ok"}), None ; "no id field")]
    #[test_case(Value::Null, None ; "empty body")]
    fn test_report_id_extraction(response: Value, expected: Option<&str>) {
        let saved = SavedReport::from_response(response);
        assert_eq!(saved.report_id.as_deref(), expected);
    }
}
