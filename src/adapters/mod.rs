//! External system integrations for DK Bridge.
//!
//! - [`source`] - DK source data service (HTTP or export directory)
//! - [`hierarchy`] - Unify hierarchy catalog
//! - [`unify`] - Unify report builder session
//!
//! # Design Pattern
//!
//! The source side sits behind the [`source::SourceDataService`] trait and the
//! catalog behind [`hierarchy::HierarchyCatalog`], so the pipeline can run
//! against in-memory fixtures in tests.
//!
//! ```rust,no_run
//! use dkbridge::adapters::source::create_source;
//! use dkbridge::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("dkbridge.toml")?;
//! let source = create_source(&config.source)?;
//! let reports = source.lookup_reports("Coffee Sales").await?;
//! # Ok(())
//! # }
//! ```

pub mod hierarchy;
pub mod source;
pub mod unify;
