//! Configuration schema types
//!
//! This module defines the configuration structure for LabLens. Every section
//! has defaults, so an empty file is a valid configuration.

use crate::core::aggregate::ON_TIME_THRESHOLD_MINUTES;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the report command gets its samples from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DatasetSource {
    /// Seeded mock data
    #[default]
    Mock,
    /// JSON dataset file
    File,
}

/// Main LabLens configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Sample dataset settings
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Metric computation settings
    #[serde(default)]
    pub metrics: MetricsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LabConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.dataset.validate()?;
        self.metrics.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Sample dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Mock generator or JSON file
    #[serde(default)]
    pub source: DatasetSource,

    /// JSON dataset path (required when source = "file")
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Mock generator seed
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Days of mock history
    #[serde(default = "default_days")]
    pub days: u32,
}

impl DatasetConfig {
    fn validate(&self) -> Result<(), String> {
        match self.source {
            DatasetSource::File => {
                if self.path.is_none() {
                    return Err("dataset.path is required when dataset.source = 'file'".to_string());
                }
            }
            DatasetSource::Mock => {
                if self.days == 0 {
                    return Err("dataset.days must be > 0".to_string());
                }
                if self.days > 3650 {
                    return Err("dataset.days must be <= 3650".to_string());
                }
            }
        }
        Ok(())
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            source: DatasetSource::default(),
            path: None,
            seed: default_seed(),
            days: default_days(),
        }
    }
}

/// Metric computation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Completed samples at or under this many minutes count as on time
    #[serde(default = "default_on_time_threshold_minutes")]
    pub on_time_threshold_minutes: u32,

    /// Trailing range used when a report names no dates (None compares today with yesterday)
    #[serde(default)]
    pub default_range_days: Option<u32>,
}

impl MetricsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.on_time_threshold_minutes == 0 {
            return Err("metrics.on_time_threshold_minutes must be > 0".to_string());
        }
        if let Some(days) = self.default_range_days {
            if days == 0 {
                return Err("metrics.default_range_days must be > 0".to_string());
            }
        }
        Ok(())
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            on_time_threshold_minutes: default_on_time_threshold_minutes(),
            default_range_days: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_seed() -> u64 {
    42
}

fn default_days() -> u32 {
    90
}

fn default_on_time_threshold_minutes() -> u32 {
    ON_TIME_THRESHOLD_MINUTES
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
