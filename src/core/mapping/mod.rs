//! DK dataset → Unify report definition
//!
//! The mapper is pure: given the same dataset, catalog and configuration it
//! produces the same definition, byte for byte.
//!
//! - [`members`] - member construction and label resolution
//! - [`template`] - the fixed parts of the definition

pub mod members;
pub mod template;

use crate::adapters::hierarchy::HierarchyCatalog;
use crate::config::MappingConfig;
use crate::domain::{
    BridgeError, Dataset, DimensionMember, HierarchyNode, MappingError, ReportDefinition, Result,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// How dataset rows turn into row-axis members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberGranularity {
    /// One member per distinct hierarchy node, in first-appearance order
    Distinct,
    /// One member per dataset row, duplicates kept
    PerRow,
}

impl MemberGranularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Distinct => "distinct",
            Self::PerRow => "per_row",
        }
    }
}

impl fmt::Display for MemberGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberGranularity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "distinct" => Ok(Self::Distinct),
            "per_row" | "per-row" => Ok(Self::PerRow),
            _ => Err(format!(
                "Invalid granularity '{s}'. Must be 'distinct' or 'per_row'"
            )),
        }
    }
}

/// Builds report definitions from resolved datasets
pub struct PayloadMapper {
    config: MappingConfig,
    catalog: Arc<dyn HierarchyCatalog>,
}

impl PayloadMapper {
    pub fn new(config: MappingConfig, catalog: Arc<dyn HierarchyCatalog>) -> Self {
        Self { config, catalog }
    }

    /// Build the definition for `report_name` from `dataset`
    ///
    /// # Errors
    ///
    /// - [`MappingError::EmptyDataset`] when the dataset has no rows
    /// - [`MappingError::MissingColumn`] when a configured column is absent
    /// - [`MappingError::UnmappableDimension`] for the first label that does
    ///   not resolve to exactly one hierarchy node
    /// - [`BridgeError::Validation`] if the assembled definition breaks a
    ///   structural rule
    pub fn build(&self, report_name: &str, dataset: &Dataset) -> Result<ReportDefinition> {
        if dataset.is_empty() {
            return Err(MappingError::EmptyDataset.into());
        }

        let label_index = dataset
            .column_index(&self.config.dimension_column)
            .ok_or_else(|| MappingError::MissingColumn(self.config.dimension_column.clone()))?;

        let path_index = match &self.config.path_column {
            Some(column) => Some(
                dataset
                    .column_index(column)
                    .ok_or_else(|| MappingError::MissingColumn(column.clone()))?,
            ),
            None => None,
        };

        let dimension = self.config.row_dimension.as_str();
        let mut resolved: HashMap<(String, Option<String>), HierarchyNode> = HashMap::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut row_members: Vec<DimensionMember> = Vec::new();

        for (row_number, row) in dataset.rows().iter().enumerate() {
            let label = row.get(label_index).unwrap_or_default().trim();
            if label.is_empty() {
                return Err(MappingError::UnmappableDimension {
                    label: String::new(),
                    reason: format!(
                        "row {} has a blank '{}' value",
                        row_number + 1,
                        self.config.dimension_column
                    ),
                }
                .into());
            }

            let ancestors = path_index
                .and_then(|i| row.get(i))
                .map(str::trim)
                .filter(|s| !s.is_empty());

            let key = (label.to_string(), ancestors.map(str::to_string));
            let node = match resolved.get(&key) {
                Some(node) => node.clone(),
                None => {
                    let node =
                        members::resolve_label(self.catalog.as_ref(), dimension, label, ancestors)?;
                    resolved.insert(key, node.clone());
                    node
                }
            };

            let member = members::member_from_node(&node);
            match self.config.granularity {
                MemberGranularity::Distinct => {
                    if seen.insert(member.id.clone()) {
                        row_members.push(member);
                    }
                }
                MemberGranularity::PerRow => row_members.push(member),
            }
        }

        let measures = self
            .config
            .measures
            .iter()
            .map(members::measure_member)
            .collect();

        let definition = template::report_definition(
            report_name,
            &self.config.model_id,
            template::row_axis(dimension, row_members),
            template::measures_axis(measures),
        );

        definition.validate().map_err(BridgeError::Validation)?;

        tracing::debug!(
            report = report_name,
            rows = dataset.len(),
            members = definition.row_members().count(),
            granularity = %self.config.granularity,
            "Built report definition"
        );

        Ok(definition)
    }
}
