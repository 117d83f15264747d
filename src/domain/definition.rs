//! Unify report definition wire model
//!
//! Typed records for the document posted to the Unify `saveReport` endpoint.
//! Field names and nesting follow the platform's JSON exactly; optional fields
//! that the platform expects as explicit `null` are serialized as `null`, not
//! skipped.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Name of the column axis every accepted definition carries
pub const MEASURES_AXIS: &str = "Measures";

/// Complete report definition document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDefinition {
    pub is_unify_template: bool,
    pub report_name: String,
    pub description: String,
    pub workspace_id: Option<String>,
    pub model_id: String,
    pub asymmetric: bool,
    #[serde(rename = "async")]
    pub is_async: bool,
    pub progressive_filter: ProgressiveFilter,
    pub metadata: DisplayMetadata,
    pub tags: Vec<String>,
    pub grid_layout: GridLayout,
    pub hierarchies: Vec<Value>,
    pub grid_visible: bool,
    pub chart_visible: bool,
    pub visualizer_config: VisualizerConfig,
}

impl ReportDefinition {
    /// Check the structural rules the platform enforces on submission
    ///
    /// The grid must carry the Measures column axis, and every member's
    /// `fullPath` must end at its `name`.
    pub fn validate(&self) -> Result<(), String> {
        if self.report_name.trim().is_empty() {
            return Err("reportName cannot be empty".to_string());
        }

        let measures = self
            .grid_layout
            .column
            .iter()
            .find(|axis| axis.name == MEASURES_AXIS)
            .ok_or_else(|| "gridLayout.column must contain the Measures axis".to_string())?;
        if measures.members.is_empty() {
            return Err("Measures axis must select at least one measure".to_string());
        }

        for axis in self.grid_layout.axes() {
            for member in &axis.members {
                if !member.full_path.ends_with(&format!(".{}", member.name)) {
                    return Err(format!(
                        "member '{}' on axis '{}' has fullPath '{}' that does not end at its name",
                        member.id, axis.name, member.full_path
                    ));
                }
            }
        }

        Ok(())
    }

    /// SHA-256 of the wire JSON, hex encoded
    ///
    /// Field order is fixed by the struct layout, so equal definitions always
    /// produce equal fingerprints.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        let bytes = serde_json::to_vec(self)?;
        let digest = Sha256::digest(&bytes);
        Ok(format!("{digest:x}"))
    }

    /// Row axis members, in order
    pub fn row_members(&self) -> impl Iterator<Item = &DimensionMember> {
        self.grid_layout.row.iter().flat_map(|axis| axis.members.iter())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressiveFilter {
    pub progressive_dimensions: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayMetadata {
    pub margin: u32,
    pub background: Background,
}

impl Default for DisplayMetadata {
    fn default() -> Self {
        Self {
            margin: 0,
            background: Background::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Background {
    pub color: String,
    #[serde(rename = "imageURL")]
    pub image_url: String,
    pub opacity: u32,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            color: String::new(),
            image_url: String::new(),
            opacity: 100,
        }
    }
}

/// Axes of the report grid
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub row: Vec<DimensionAxis>,
    pub column: Vec<DimensionAxis>,
    pub filter: Vec<DimensionAxis>,
    pub other: Vec<DimensionAxis>,
}

impl GridLayout {
    /// Every axis, in row, column, filter, other order
    pub fn axes(&self) -> impl Iterator<Item = &DimensionAxis> {
        self.row
            .iter()
            .chain(&self.column)
            .chain(&self.filter)
            .chain(&self.other)
    }
}

/// One axis of the grid (a dimension placed on rows, columns or filters)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionAxis {
    pub name: String,
    pub members: Vec<DimensionMember>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<Value>>,
    pub is_editable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_persist_selections: Option<bool>,
    pub is_visible: bool,
    pub user_alias: String,
    pub system_alias: String,
    pub ui_disp_dim_name: String,
}

/// One selected node of a dimension hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionMember {
    pub id: String,
    pub is_selected: bool,
    pub level: String,
    pub full_path: String,
    pub name: String,
    pub time_aggregate: Option<String>,
    pub disp_level_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizerConfig {
    pub visualizers: Vec<Value>,
    pub vis_layout: VisLayout,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            visualizers: Vec::new(),
            vis_layout: VisLayout {
                template: "OneCellTemplate".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisLayout {
    pub template: String,
}
