//! Core business logic for DK Bridge.
//!
//! # Modules
//!
//! - [`resolve`] - report name → report → batch → dataset
//! - [`mapping`] - dataset → Unify report definition
//! - [`migrate`] - orchestration of the full pipeline
//!
//! # Migration Workflow
//!
//! 1. **Resolve**: look up the DK report and pick a batch
//! 2. **Map**: resolve each dimension label through the hierarchy catalog and
//!    build the definition
//! 3. **Login**: open a Unify session
//! 4. **Save**: submit the definition
//!
//! # Example
//!
//! ```rust,no_run
//! use dkbridge::config::load_config;
//! use dkbridge::core::migrate::MigrationOrchestrator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("dkbridge.toml")?;
//! let mut orchestrator = MigrationOrchestrator::from_config(&config)?;
//!
//! let saved = orchestrator.run(&config.source.report_name).await?;
//! println!("Unify report id: {:?}", saved.report_id);
//! # Ok(())
//! # }
//! ```

pub mod mapping;
pub mod migrate;
pub mod resolve;
