//! Init command implementation
//!
//! Writes a commented sample configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "dkbridge.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, sample_config()) {
            Ok(()) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your DK and Unify endpoints", self.output);
                println!("  2. Export the Unify hierarchy nodes to mapping.catalog_path");
                println!("  3. Set DKBRIDGE_UNIFY_PASSWORD in the environment or a .env file");
                println!("  4. Validate configuration: dkbridge validate-config");
                println!("  5. Preview: dkbridge migrate --dry-run --output definition.json");
                println!("  6. Migrate: dkbridge migrate");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }
}

/// Sample configuration written by `dkbridge init`
pub fn sample_config() -> &'static str {
    r#"# DK Bridge Configuration File
# Decision Key to Unify report migration

[application]
log_level = "info"   # trace | debug | info | warn | error
dry_run = false      # true: build the definition, never contact Unify

[source]
kind = "http"                       # http | directory
report_name = "Coffee Sales"
base_url = "https://dk.example.com/api"
# directory = "/srv/dk-export"      # kind = "directory": reports.json, batches/, data/
# username = "dk-reader"
# password = "${DKBRIDGE_SOURCE_PASSWORD}"
timeout_seconds = 60
report_selection = "first"          # first | last | unique
batch_selection = "first"           # first | last | unique

[unify]
base_url = "https://unify.example.com/unify-internal/reportbuilder"
username = "migrator"
password = "${DKBRIDGE_UNIFY_PASSWORD}"
app_name = "DKBridge"
timeout_seconds = 60
tls_verify = true

[mapping]
model_id = "1100"
row_dimension = "Product"
dimension_column = "category"
# path_column = "category_path"     # ancestor chain, tells apart shared leaf names
granularity = "distinct"            # distinct | per_row
catalog_path = "catalog/product.toml"

[[mapping.measures]]
id = "!M2_1"
folder = "Sales : FOLDER"
name = "Dollar Sales"

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"            # daily | hourly | never
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BridgeConfig;
    use tempfile::TempDir;

    #[test]
    fn test_sample_config_parses() {
        let text = sample_config().replace("${DKBRIDGE_UNIFY_PASSWORD}", "hunter2");
        let config: BridgeConfig = toml::from_str(&text).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.mapping.measures.len(), 1);
    }

    #[tokio::test]
    async fn test_init_writes_file() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("dkbridge.toml");
        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            force: false,
        };

        assert_eq!(args.execute().await.unwrap(), 0);
        assert!(fs::read_to_string(&output).unwrap().contains("[mapping]"));
    }

    #[tokio::test]
    async fn test_init_refuses_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("dkbridge.toml");
        fs::write(&output, "keep me").unwrap();

        let mut args = InitArgs {
            output: output.to_string_lossy().to_string(),
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "keep me");

        args.force = true;
        assert_eq!(args.execute().await.unwrap(), 0);
    }
}
