//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the LabLens configuration file.

use crate::config::{load_config, DatasetSource};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Loading already validates, so any failure is reported with the
    /// configuration exit code.
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(e.exit_code());
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        match config.dataset.source {
            DatasetSource::Mock => {
                println!("  Dataset: mock (seed {}, {} days)", config.dataset.seed, config.dataset.days);
            }
            DatasetSource::File => {
                let path = config
                    .dataset
                    .path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                println!("  Dataset: file ({path})");
            }
        }
        println!(
            "  On-Time Threshold: {} minutes",
            config.metrics.on_time_threshold_minutes
        );
        match config.metrics.default_range_days {
            Some(days) => println!("  Default Range: last {days} days"),
            None => println!("  Default Range: today vs yesterday"),
        }
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        } else {
            println!("  File Logging: disabled");
        }
        println!();
        Ok(0)
    }
}
