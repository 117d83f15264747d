//! Source report resolution
//!
//! - [`policy`] - named selection policies for reports and batches
//! - [`resolver`] - report name → report → batch → dataset

pub mod policy;
pub mod resolver;

pub use policy::SelectionPolicy;
pub use resolver::{ReportResolver, ResolvedReport};
