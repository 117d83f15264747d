//! Validate config command implementation
//!
//! Loads the configuration file and the hierarchy catalog it points at.

use crate::adapters::hierarchy::StaticHierarchyCatalog;
use crate::config::load_config;
use crate::config::SourceKind;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let catalog = match StaticHierarchyCatalog::from_file(&config.mapping.catalog_path) {
            Ok(catalog) => {
                println!("✅ Hierarchy catalog loaded ({} nodes)", catalog.len());
                catalog
            }
            Err(e) => {
                println!("❌ Hierarchy catalog is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Report: {}", config.source.report_name);
        match config.source.kind {
            SourceKind::Http => println!(
                "  DK Source: http {}",
                config.source.base_url.as_deref().unwrap_or_default()
            ),
            SourceKind::Directory => println!(
                "  DK Source: directory {}",
                config.source.directory.as_deref().unwrap_or_default()
            ),
        }
        println!(
            "  Selection: report={} batch={}",
            config.source.report_selection, config.source.batch_selection
        );
        println!("  Unify: {}", config.unify.base_url);
        println!("  App Name: {}", config.unify.app_name);
        println!("  Model ID: {}", config.mapping.model_id);
        println!("  Row Dimension: {}", config.mapping.row_dimension);
        println!("  Granularity: {}", config.mapping.granularity);
        println!("  Catalog Nodes: {}", catalog.len());
        println!("  Measures: {}", config.mapping.measures.len());
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_missing_config_file() {
        let code = ValidateArgs {}.execute("does/not/exist.toml").await.unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_missing_catalog_is_reported() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[source]
kind = "directory"
report_name = "Coffee Sales"
directory = "/srv/dk-export"

[unify]
base_url = "https://unify.example.com/reportbuilder"
username = "migrator"
password = "hunter2"
app_name = "DKBridge"

[mapping]
granularity = "distinct"
catalog_path = "does/not/exist.toml"
"#
        )
        .unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
