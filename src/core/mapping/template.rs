//! Fixed report template
//!
//! Everything in the definition that does not come from the dataset: axis
//! flags, display metadata, visualizer layout.

use crate::domain::definition::{DisplayMetadata, ProgressiveFilter, VisualizerConfig};
use crate::domain::{DimensionAxis, DimensionMember, GridLayout, ReportDefinition, MEASURES_AXIS};

/// Row axis for `dimension`, holding the mapped members
pub fn row_axis(dimension: &str, members: Vec<DimensionMember>) -> DimensionAxis {
    DimensionAxis {
        name: dimension.to_string(),
        members,
        attributes: Some(Vec::new()),
        is_editable: true,
        is_persist_selections: Some(true),
        is_visible: true,
        user_alias: dimension.to_string(),
        system_alias: dimension.to_string(),
        ui_disp_dim_name: dimension.to_string(),
    }
}

/// Hidden Measures column axis
pub fn measures_axis(members: Vec<DimensionMember>) -> DimensionAxis {
    DimensionAxis {
        name: MEASURES_AXIS.to_string(),
        members,
        attributes: None,
        is_editable: false,
        is_persist_selections: None,
        is_visible: false,
        user_alias: MEASURES_AXIS.to_string(),
        system_alias: MEASURES_AXIS.to_string(),
        ui_disp_dim_name: MEASURES_AXIS.to_string(),
    }
}

pub fn description(report_name: &str) -> String {
    format!("Migrated from DK Report: {report_name}")
}

/// Assemble the full definition around the two axes
pub fn report_definition(
    report_name: &str,
    model_id: &str,
    row: DimensionAxis,
    column: DimensionAxis,
) -> ReportDefinition {
    ReportDefinition {
        is_unify_template: true,
        report_name: report_name.to_string(),
        description: description(report_name),
        workspace_id: None,
        model_id: model_id.to_string(),
        asymmetric: true,
        is_async: true,
        progressive_filter: ProgressiveFilter::default(),
        metadata: DisplayMetadata::default(),
        tags: Vec::new(),
        grid_layout: GridLayout {
            row: vec![row],
            column: vec![column],
            filter: Vec::new(),
            other: Vec::new(),
        },
        hierarchies: Vec::new(),
        grid_visible: true,
        chart_visible: false,
        visualizer_config: VisualizerConfig::default(),
    }
}
