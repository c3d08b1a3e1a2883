//! Generate command implementation
//!
//! This module implements the `generate` command, which writes a seeded
//! mock dataset to a JSON file that `report` can read back.

use crate::config::{load_config, load_config_or_default};
use crate::data::MockDataGenerator;
use crate::domain::window::{end_of_day, parse_date};
use chrono::Utc;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path of the JSON dataset to write
    #[arg(short, long)]
    pub output: PathBuf,

    /// Generator seed (defaults to dataset.seed)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Days of history (defaults to dataset.days)
    #[arg(long)]
    pub days: Option<u32>,

    /// Last day of history (defaults to the current UTC date)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub today: Option<String>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateArgs {
    /// Execute the generate command
    ///
    /// A missing configuration file falls back to defaults only when
    /// `explicit_config` is false.
    pub fn execute(&self, config_path: &str, explicit_config: bool) -> anyhow::Result<i32> {
        let loaded = if explicit_config {
            load_config(config_path)
        } else {
            load_config_or_default(config_path)
        };
        let config = match loaded {
            Ok(config) => config,
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("❌ {e}");
                return Ok(e.exit_code());
            }
        };

        let seed = self.seed.unwrap_or(config.dataset.seed);
        let days = self.days.unwrap_or(config.dataset.days);
        tracing::info!(seed, days, output = %self.output.display(), "Generating mock dataset");

        if self.output.exists() && !self.force {
            eprintln!("❌ Output file already exists: {}", self.output.display());
            eprintln!("   Use --force to overwrite");
            return Ok(2);
        }

        let now = match self.today.as_deref().map(parse_date).transpose() {
            Ok(Some(today)) => end_of_day(today),
            Ok(None) => Utc::now(),
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(e.exit_code());
            }
        };

        let store = match MockDataGenerator::new(seed).days(days).now(now).into_store() {
            Ok(store) => store,
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to generate dataset");
                eprintln!("❌ {e}");
                return Ok(e.exit_code());
            }
        };

        if let Err(e) = store.save_json(&self.output) {
            crate::log_error_with_context!(&e, "Failed to write dataset");
            eprintln!("❌ {e}");
            return Ok(e.exit_code());
        }

        println!(
            "✅ Wrote {} samples over {} days to {}",
            store.samples().len(),
            days,
            self.output.display()
        );

        let per_location = store.samples_per_location();
        for location in store.locations() {
            let count = per_location.get(&location.id).copied().unwrap_or(0);
            println!("   {:<28} {:>6}", location.name, count);
        }

        Ok(0)
    }
}
