//! Unify hierarchy catalog
//!
//! The mapper cannot derive a member id from a DK label alone: the id encodes
//! the node's whole ancestor chain, and leaf names repeat across branches. The
//! catalog is the lookup that bridges the two.

pub mod catalog;

pub use catalog::StaticHierarchyCatalog;

use crate::domain::HierarchyNode;

/// Lookup of target hierarchy nodes by leaf label
pub trait HierarchyCatalog: Send + Sync {
    /// Every node of `dimension` whose leaf name matches `label`, in a stable order
    fn lookup(&self, dimension: &str, label: &str) -> Vec<HierarchyNode>;
}
