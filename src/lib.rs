// DK Bridge - Decision Key to Unify report migration tool
// Copyright (c) 2025 DK Bridge Contributors
// Licensed under the MIT License

//! # DK Bridge - Decision Key to Unify report migration
//!
//! DK Bridge moves a report defined in the legacy DK reporting system into the
//! Unify analytics platform as a saved report definition.
//!
//! ## Overview
//!
//! One migration run:
//! - **Resolves** a DK report name to a report, one of its executed batches,
//!   and that batch's tabular data
//! - **Maps** the data's dimension labels to Unify hierarchy members and
//!   builds a report definition (row axis plus a Measures column axis)
//! - **Logs in** to Unify and **saves** the definition
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Resolver, payload mapper and migration orchestrator
//! - [`adapters`] - DK source service, hierarchy catalog, Unify session
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dkbridge::config::load_config;
//! use dkbridge::core::migrate::MigrationOrchestrator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("dkbridge.toml")?;
//!     let mut orchestrator = MigrationOrchestrator::from_config(&config)?;
//!
//!     // Build the definition without touching Unify
//!     let plan = orchestrator.plan("Coffee Sales").await?;
//!     println!("{} row members", plan.definition.row_members().count());
//!
//!     // Log in and save it
//!     let saved = orchestrator.submit(&plan).await?;
//!     println!("Saved as {:?}", saved.report_id);
//!     Ok(())
//! }
//! ```
//!
//! ## Member Identity
//!
//! A Unify member carries two encodings of the same hierarchy position: a
//! colon-delimited id (`:SubCategory:4527492:...:6124292`) and a
//! period-delimited `fullPath`. Both are derived from one
//! [`domain::HierarchyNode`] looked up in the hierarchy catalog, so they
//! always agree.
//!
//! ## Error Handling
//!
//! Library code returns [`domain::Result`]; pipeline failures are wrapped in
//! [`domain::MigrationError`] naming the stage (`resolve`, `map`, `login`,
//! `save`) that failed:
//!
//! ```rust,no_run
//! use dkbridge::domain::{MigrationError, Stage};
//!
//! fn describe(err: &MigrationError) -> String {
//!     match err.stage {
//!         Stage::Resolve | Stage::Map => format!("nothing was sent to Unify: {err}"),
//!         Stage::Login | Stage::Save => format!("Unify call failed: {err}"),
//!     }
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
