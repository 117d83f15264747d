//! Target hierarchy nodes and measure selections
//!
//! A [`HierarchyNode`] is the single source of both views of a member's
//! identity: the colon-delimited `id` and the period-delimited `fullPath` are
//! derived from the same `ids`/`names` chain, so they cannot drift apart.

use serde::{Deserialize, Serialize};

/// A node of a Unify dimension hierarchy
///
/// `ids[i]` is the platform identifier of the ancestor named `names[i]`; the
/// last entry is the node itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HierarchyNode {
    /// Dimension the node belongs to (e.g. "Product")
    pub dimension: String,

    /// Hierarchy within the dimension (e.g. "Standard Hierarchy")
    pub hierarchy: String,

    /// Level of the node (e.g. "SubCategory")
    pub level: String,

    /// Ancestor identifiers from the hierarchy root down to the node
    pub ids: Vec<u64>,

    /// Ancestor names from the hierarchy root down to the node
    pub names: Vec<String>,
}

impl HierarchyNode {
    /// Check the shape rules that keep `member_id` and `full_path` in step
    pub fn validate(&self) -> Result<(), String> {
        for (field, value) in [
            ("dimension", &self.dimension),
            ("hierarchy", &self.hierarchy),
            ("level", &self.level),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{field} cannot be empty"));
            }
        }

        if self.level.contains(':') {
            return Err(format!("level '{}' cannot contain ':'", self.level));
        }

        if self.ids.is_empty() {
            return Err("ids cannot be empty".to_string());
        }

        if self.ids.len() != self.names.len() {
            return Err(format!(
                "ids has {} entries but names has {}",
                self.ids.len(),
                self.names.len()
            ));
        }

        if let Some(bad) = self
            .names
            .iter()
            .chain([&self.dimension, &self.hierarchy])
            .find(|n| n.trim().is_empty() || n.contains('.'))
        {
            return Err(format!("path segment '{bad}' is empty or contains '.'"));
        }

        Ok(())
    }

    /// Leaf name of the node
    pub fn name(&self) -> &str {
        self.names.last().map(String::as_str).unwrap_or_default()
    }

    /// Platform member id: `:<Level>:<id>:<id>...`
    pub fn member_id(&self) -> String {
        let mut id = format!(":{}", self.level);
        for ancestor in &self.ids {
            id.push(':');
            id.push_str(&ancestor.to_string());
        }
        id
    }

    /// Human readable ancestor chain: `<Dimension>.<Hierarchy>.<name>...`
    pub fn full_path(&self) -> String {
        let mut segments = Vec::with_capacity(self.names.len() + 2);
        segments.push(self.dimension.as_str());
        segments.push(self.hierarchy.as_str());
        segments.extend(self.names.iter().map(String::as_str));
        segments.join(".")
    }

    /// True when the node's full path ends with the `suffix` segments
    ///
    /// Comparison is case-insensitive and ignores surrounding whitespace.
    pub fn path_ends_with(&self, suffix: &[&str]) -> bool {
        let segments: Vec<&str> = [self.dimension.as_str(), self.hierarchy.as_str()]
            .into_iter()
            .chain(self.names.iter().map(String::as_str))
            .collect();
        if suffix.len() > segments.len() {
            return false;
        }
        segments[segments.len() - suffix.len()..]
            .iter()
            .zip(suffix)
            .all(|(have, want)| have.trim().eq_ignore_ascii_case(want.trim()))
    }
}

/// A measure selected on the Measures axis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureSpec {
    /// Platform measure id (e.g. "!M2_1")
    pub id: String,

    /// Folder the measure lives in (e.g. "Sales : FOLDER")
    pub folder: String,

    /// Display name (e.g. "Dollar Sales")
    pub name: String,
}

impl MeasureSpec {
    pub fn full_path(&self) -> String {
        format!("Measures.{}.{}", self.folder, self.name)
    }
}

impl Default for MeasureSpec {
    fn default() -> Self {
        Self {
            id: "!M2_1".to_string(),
            folder: "Sales : FOLDER".to_string(),
            name: "Dollar Sales".to_string(),
        }
    }
}
