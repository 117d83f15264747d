//! Tabular batch data
//!
//! A [`Dataset`] is the header plus rows of one DK batch. Rows are
//! semi-structured: nothing about the column set is fixed, callers look values
//! up by column name.

use super::errors::SourceError;
use serde::Serialize;

/// One record of a batch, in header order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRow(Vec<String>);

impl SourceRow {
    pub fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    /// Value at a column position
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Header and rows of one batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<SourceRow>,
}

impl Dataset {
    /// Build a dataset, checking every row against the header width
    pub fn new(columns: Vec<String>, rows: Vec<SourceRow>) -> Result<Self, SourceError> {
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(SourceError::MalformedDataset(format!(
                "row {} has {} fields, header has {}",
                index + 1,
                row.len(),
                columns.len()
            )));
        }

        Ok(Self { columns, rows })
    }

    /// Parse the comma-delimited batch serialization (header row required)
    ///
    /// # Examples
    ///
    /// ```
    /// use dkbridge::domain::Dataset;
    ///
    /// let dataset = Dataset::from_csv("category,sales\nCOFFEE,1000\n").unwrap();
    /// assert_eq!(dataset.len(), 1);
    /// assert_eq!(dataset.value(0, "category"), Some("COFFEE"));
    /// ```
    pub fn from_csv(text: &str) -> Result<Self, SourceError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| SourceError::MalformedDataset(format!("unreadable CSV header: {e}")))?
            .iter()
            .map(str::to_string)
            .collect();

        if columns.iter().all(|c| c.is_empty()) {
            return Err(SourceError::MalformedDataset(
                "CSV payload has no header row".to_string(),
            ));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| SourceError::MalformedDataset(e.to_string()))?;
            rows.push(SourceRow::new(record.iter().map(str::to_string).collect()));
        }

        Self::new(columns, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[SourceRow] {
        &self.rows
    }

    /// Position of a column in the header
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.columns.iter().position(|c| c == name)
    }

    /// Value of `column` in row `row`
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_csv_basic() {
        let dataset = Dataset::from_csv(
            "category,sales\nCOFFEE ADDITIVE/FLAVORING,1000\nCOFFEE,250\n",
        )
        .unwrap();

        assert_eq!(dataset.columns(), &["category", "sales"]);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.value(0, "category"), Some("COFFEE ADDITIVE/FLAVORING"));
        assert_eq!(dataset.value(1, "sales"), Some("250"));
    }

    #[test]
    fn test_from_csv_quoted_fields_and_whitespace() {
        let dataset =
            Dataset::from_csv(" category , sales \n\"AISLE-COFFEE, TEA\",12\n").unwrap();

        assert_eq!(dataset.column_index("category"), Some(0));
        assert_eq!(dataset.value(0, "category"), Some("AISLE-COFFEE, TEA"));
    }

    #[test]
    fn test_from_csv_header_only() {
        let dataset = Dataset::from_csv("category,sales\n").unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_from_csv_ragged_row_is_malformed() {
        let result = Dataset::from_csv("category,sales\nCOFFEE\n");
        assert!(matches!(result, Err(SourceError::MalformedDataset(_))));
    }

    #[test]
    fn test_from_csv_empty_payload_is_malformed() {
        let result = Dataset::from_csv("");
        assert!(matches!(result, Err(SourceError::MalformedDataset(_))));
    }

    #[test]
    fn test_unknown_column() {
        let dataset = Dataset::from_csv("category\nCOFFEE\n").unwrap();
        assert_eq!(dataset.column_index("brand"), None);
        assert_eq!(dataset.value(0, "brand"), None);
    }
}
