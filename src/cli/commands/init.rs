//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::cli::DEFAULT_CONFIG_PATH;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing LabLens configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Optionally write a dataset: lablens generate --output samples.json");
                println!("  3. Validate configuration: lablens validate-config");
                println!("  4. Run a report: lablens report --last-days 7");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Configuration template with every setting and its default
    fn generate_config() -> String {
        r#"# LabLens Configuration File
# Laboratory sample throughput analytics

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Dataset
# ============================================================================
[dataset]
# "mock" generates a seeded history, "file" reads a JSON dataset
source = "mock"

# JSON dataset path (required when source = "file")
# path = "${LABLENS_DATA_DIR}/samples.json"

# Mock generator seed and history length
seed = 42
days = 90

# ============================================================================
# Metrics
# ============================================================================
[metrics]
# Completed samples at or under this many minutes count as on time
on_time_threshold_minutes = 120

# Trailing range used when a report names no dates
# (omit to compare today with yesterday)
# default_range_days = 7

# ============================================================================
# Logging
# ============================================================================
[logging]
# Enable local JSON file logging
local_enabled = false

# Log directory
local_path = "logs"

# Log rotation (daily, hourly, never)
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use tempfile::TempDir;

    #[test]
    fn test_generated_config_is_valid() {
        let config = parse_config(&InitArgs::generate_config()).unwrap();
        assert_eq!(config.metrics.on_time_threshold_minutes, 120);
        assert_eq!(config.dataset.days, 90);
    }

    #[test]
    fn test_init_writes_and_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("lablens.toml").to_string_lossy().to_string();

        let args = InitArgs {
            output: output.clone(),
            force: false,
        };
        assert_eq!(args.execute().unwrap(), 0);
        assert!(Path::new(&output).exists());
        assert_eq!(args.execute().unwrap(), 2);

        let forced = InitArgs {
            output,
            force: true,
        };
        assert_eq!(forced.execute().unwrap(), 0);
    }
}
