//! Configuration management for LabLens.
//!
//! TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! LabLens uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `LABLENS_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use lablens::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("lablens.toml")?;
//!
//! println!("Dataset source: {:?}", config.dataset.source);
//! println!("On-time threshold: {} min", config.metrics.on_time_threshold_minutes);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`DatasetConfig`] - Mock generator or JSON dataset file
//! - [`MetricsConfig`] - On-time threshold and default report range
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [dataset]
//! source = "file"
//! path = "${LABLENS_DATA_DIR}/samples.json"
//!
//! [metrics]
//! on_time_threshold_minutes = 120
//! default_range_days = 7
//!
//! [logging]
//! local_enabled = true
//! local_path = "logs"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_or_default, parse_config};
pub use schema::{
    ApplicationConfig, DatasetConfig, DatasetSource, LabConfig, LoggingConfig, MetricsConfig,
};
