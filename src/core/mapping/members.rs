//! Member construction and label resolution

use crate::adapters::hierarchy::HierarchyCatalog;
use crate::domain::{DimensionMember, HierarchyNode, MappingError, MeasureSpec};

/// Row-axis member for a hierarchy node
///
/// `id` and `fullPath` both come from the node, never from the source label.
pub fn member_from_node(node: &HierarchyNode) -> DimensionMember {
    DimensionMember {
        id: node.member_id(),
        is_selected: true,
        level: node.level.clone(),
        full_path: node.full_path(),
        name: node.name().to_string(),
        time_aggregate: None,
        disp_level_name: node.level.clone(),
    }
}

/// Measures-axis member for a configured measure
pub fn measure_member(measure: &MeasureSpec) -> DimensionMember {
    DimensionMember {
        id: measure.id.clone(),
        is_selected: true,
        level: measure.folder.clone(),
        full_path: measure.full_path(),
        name: measure.name.clone(),
        time_aggregate: None,
        disp_level_name: measure.folder.clone(),
    }
}

/// Split an ancestor chain cell ("A.B.C" or "A > B > C") into segments
pub fn split_ancestor_path(raw: &str) -> Vec<&str> {
    let separator = if raw.contains('>') { '>' } else { '.' };
    raw.split(separator)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Resolve one source label to exactly one hierarchy node
///
/// `ancestors` is the optional ancestor chain from the dataset; it only
/// matters when several nodes share the label as leaf name. The chain may or
/// may not repeat the label as its last segment.
///
/// # Errors
///
/// [`MappingError::UnmappableDimension`] when no node, or more than one node,
/// remains.
pub fn resolve_label(
    catalog: &dyn HierarchyCatalog,
    dimension: &str,
    label: &str,
    ancestors: Option<&str>,
) -> Result<HierarchyNode, MappingError> {
    let mut candidates = catalog.lookup(dimension, label);

    if candidates.is_empty() {
        return Err(MappingError::UnmappableDimension {
            label: label.to_string(),
            reason: format!("no {dimension} hierarchy node has this name"),
        });
    }

    if candidates.len() > 1 {
        if let Some(raw) = ancestors.filter(|a| !a.trim().is_empty()) {
            let mut chain = split_ancestor_path(raw);
            let ends_at_label = chain
                .last()
                .is_some_and(|last| last.eq_ignore_ascii_case(label.trim()));
            if !ends_at_label {
                chain.push(label.trim());
            }
            candidates.retain(|node| node.path_ends_with(&chain));
        }
    }

    match candidates.len() {
        1 => Ok(candidates.remove(0)),
        0 => Err(MappingError::UnmappableDimension {
            label: label.to_string(),
            reason: format!(
                "no {dimension} hierarchy node matches ancestor path '{}'",
                ancestors.unwrap_or_default()
            ),
        }),
        n => Err(MappingError::UnmappableDimension {
            label: label.to_string(),
            reason: format!("ambiguous: {n} {dimension} hierarchy nodes share this name"),
        }),
    }
}
