//! File-backed hierarchy catalog
//!
//! The catalog is a TOML export of the Unify hierarchy nodes a migration may
//! select:
//!
//! ```toml
//! [[nodes]]
//! dimension = "Product"
//! hierarchy = "Standard Hierarchy"
//! level = "SubCategory"
//! ids = [4527492, 3506828, 3506829, 3506762, 3506881, 6124292]
//! names = ["TOTAL STORE", "EDIBLE", "DEPT-BEVERAGES", "AISLE-COFFEE & TEA", "COFFEE", "COFFEE ADDITIVE/FLAVORING"]
//! ```

use super::HierarchyCatalog;
use crate::domain::{HierarchyNode, MappingError};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    nodes: Vec<HierarchyNode>,
}

/// In-memory catalog indexed by dimension and leaf name
#[derive(Debug, Clone, Default)]
pub struct StaticHierarchyCatalog {
    nodes: Vec<HierarchyNode>,
    by_leaf: HashMap<(String, String), Vec<usize>>,
}

impl StaticHierarchyCatalog {
    /// Build a catalog, validating every node
    ///
    /// # Errors
    ///
    /// [`MappingError::Catalog`] naming the first invalid node, or both
    /// nodes when two share a member id but not a full path.
    pub fn from_nodes(nodes: Vec<HierarchyNode>) -> Result<Self, MappingError> {
        let mut by_leaf: HashMap<(String, String), Vec<usize>> = HashMap::new();
        let mut by_member: HashMap<(String, String), usize> = HashMap::new();

        for (index, node) in nodes.iter().enumerate() {
            node.validate()
                .map_err(|e| MappingError::Catalog(format!("node {index}: {e}")))?;

            let member_id = node.member_id();
            if let Some(&first) = by_member.get(&(node.dimension.clone(), member_id.clone())) {
                if nodes[first].full_path() != node.full_path() {
                    return Err(MappingError::Catalog(format!(
                        "nodes {first} and {index}: member id {member_id} has two full paths"
                    )));
                }
            } else {
                by_member.insert((node.dimension.clone(), member_id), index);
            }

            by_leaf
                .entry(leaf_key(&node.dimension, node.name()))
                .or_default()
                .push(index);
        }

        Ok(Self { nodes, by_leaf })
    }

    /// Parse a catalog from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, MappingError> {
        let file: CatalogFile = toml::from_str(text)
            .map_err(|e| MappingError::Catalog(format!("Failed to parse catalog: {e}")))?;
        Self::from_nodes(file.nodes)
    }

    /// Load a catalog file
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dkbridge::adapters::hierarchy::{HierarchyCatalog, StaticHierarchyCatalog};
    ///
    /// let catalog = StaticHierarchyCatalog::from_file("catalog/product.toml").unwrap();
    /// let nodes = catalog.lookup("Product", "COFFEE ADDITIVE/FLAVORING");
    /// ```
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MappingError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            MappingError::Catalog(format!("Failed to read catalog {}: {e}", path.display()))
        })?;
        let catalog = Self::from_toml_str(&text)?;

        tracing::info!(
            path = %path.display(),
            nodes = catalog.len(),
            "Loaded hierarchy catalog"
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

fn leaf_key(dimension: &str, name: &str) -> (String, String) {
    (
        dimension.trim().to_lowercase(),
        name.trim().to_lowercase(),
    )
}

impl HierarchyCatalog for StaticHierarchyCatalog {
    fn lookup(&self, dimension: &str, label: &str) -> Vec<HierarchyNode> {
        self.by_leaf
            .get(&leaf_key(dimension, label))
            .map(|indexes| indexes.iter().map(|&i| self.nodes[i].clone()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
[[nodes]]
dimension = "Product"
hierarchy = "Standard Hierarchy"
level = "SubCategory"
ids = [4527492, 3506828, 3506829, 3506762, 3506881, 6124292]
names = ["TOTAL STORE", "EDIBLE", "DEPT-BEVERAGES", "AISLE-COFFEE & TEA", "COFFEE", "COFFEE ADDITIVE/FLAVORING"]

[[nodes]]
dimension = "Product"
hierarchy = "Standard Hierarchy"
level = "Category"
ids = [4527492, 3506828, 3506829, 3506762, 3506881]
names = ["TOTAL STORE", "EDIBLE", "DEPT-BEVERAGES", "AISLE-COFFEE & TEA", "COFFEE"]

[[nodes]]
dimension = "Product"
hierarchy = "Standard Hierarchy"
level = "Category"
ids = [4527492, 3506828, 3506900, 3506901]
names = ["TOTAL STORE", "EDIBLE", "DEPT-FROZEN", "COFFEE"]
"#;

    #[test]
    fn test_lookup_single() {
        let catalog = StaticHierarchyCatalog::from_toml_str(CATALOG).unwrap();
        assert_eq!(catalog.len(), 3);

        let nodes = catalog.lookup("Product", "coffee additive/flavoring ");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].level, "SubCategory");
    }

    #[test]
    fn test_lookup_shared_leaf_name_in_file_order() {
        let catalog = StaticHierarchyCatalog::from_toml_str(CATALOG).unwrap();

        let nodes = catalog.lookup("Product", "COFFEE");
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].ids.len(), 5);
        assert_eq!(nodes[1].names[2], "DEPT-FROZEN");
    }

    #[test]
    fn test_lookup_is_scoped_to_dimension() {
        let catalog = StaticHierarchyCatalog::from_toml_str(CATALOG).unwrap();
        assert!(catalog.lookup("Geography", "COFFEE").is_empty());
        assert!(catalog.lookup("Product", "TEA").is_empty());
    }

    #[test]
    fn test_invalid_node_is_rejected() {
        let text = r#"
[[nodes]]
dimension = "Product"
hierarchy = "Standard Hierarchy"
level = "Category"
ids = [1, 2]
names = ["TOTAL STORE"]
"#;
        let err = StaticHierarchyCatalog::from_toml_str(text).unwrap_err();
        assert!(err.to_string().contains("node 0"));
    }

    #[test]
    fn test_conflicting_member_id_is_rejected() {
        let text = r#"
[[nodes]]
dimension = "Product"
hierarchy = "Standard Hierarchy"
level = "Category"
ids = [1, 2]
names = ["TOTAL STORE", "COFFEE"]

[[nodes]]
dimension = "Product"
hierarchy = "Standard Hierarchy"
level = "Category"
ids = [1, 2]
names = ["TOTAL STORE", "TEA"]
"#;
        let err = StaticHierarchyCatalog::from_toml_str(text).unwrap_err();
        assert!(matches!(err, MappingError::Catalog(_)));
        assert!(err.to_string().contains("nodes 0 and 1"));
    }

    #[test]
    fn test_repeated_identical_node_is_accepted() {
        let text = r#"
[[nodes]]
dimension = "Product"
hierarchy = "Standard Hierarchy"
level = "Category"
ids = [1, 2]
names = ["TOTAL STORE", "COFFEE"]

[[nodes]]
dimension = "Product"
hierarchy = "Standard Hierarchy"
level = "Category"
ids = [1, 2]
names = ["TOTAL STORE", "COFFEE"]
"#;
        let catalog = StaticHierarchyCatalog::from_toml_str(text).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_unparseable_catalog() {
        let err = StaticHierarchyCatalog::from_toml_str("nodes = 3").unwrap_err();
        assert!(matches!(err, MappingError::Catalog(_)));
    }

    #[test]
    fn test_missing_file() {
        let result = StaticHierarchyCatalog::from_file("does/not/exist.toml");
        assert!(matches!(result, Err(MappingError::Catalog(_))));
    }
}
