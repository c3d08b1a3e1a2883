//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{DatasetSource, LabConfig};
use crate::domain::errors::LabError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into LabConfig
/// 4. Applies environment variable overrides (LABLENS_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use lablens::config::loader::load_config;
///
/// let config = load_config("lablens.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<LabConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LabError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        LabError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Loads configuration, falling back to defaults when the file does not exist
///
/// Environment overrides still apply to the defaults. A file that exists but
/// fails to parse or validate is still an error.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<LabConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "Configuration file not found, using defaults");
    let mut config = LabConfig::default();
    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

/// Parses configuration text: substitution, TOML, overrides, validation
pub fn parse_config(contents: &str) -> Result<LabConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: LabConfig = toml::from_str(&contents)
        .map_err(|e| LabError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &LabConfig) -> Result<()> {
    config.validate().map_err(|e| {
        LabError::Configuration(format!("Configuration validation failed: {}", e))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are passed through untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| LabError::Other(format!("Invalid substitution pattern: {}", e)))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(LabError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Parses a numeric override, naming the variable on failure
fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        LabError::Configuration(format!("Invalid value '{}' for {}", value, name))
    })
}

/// Applies environment variable overrides using the LABLENS_* prefix
///
/// Environment variables follow the pattern: LABLENS_<SECTION>_<KEY>
/// For example: LABLENS_DATASET_SEED, LABLENS_METRICS_ON_TIME_THRESHOLD_MINUTES
fn apply_env_overrides(config: &mut LabConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("LABLENS_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Dataset overrides
    if let Ok(val) = std::env::var("LABLENS_DATASET_SOURCE") {
        config.dataset.source = match val.trim().to_lowercase().as_str() {
            "mock" => DatasetSource::Mock,
            "file" => DatasetSource::File,
            other => {
                return Err(LabError::Configuration(format!(
                    "Invalid value '{}' for LABLENS_DATASET_SOURCE. Must be 'mock' or 'file'",
                    other
                )))
            }
        };
    }
    if let Ok(val) = std::env::var("LABLENS_DATASET_PATH") {
        config.dataset.path = Some(PathBuf::from(val));
    }
    if let Ok(val) = std::env::var("LABLENS_DATASET_SEED") {
        config.dataset.seed = parse_override("LABLENS_DATASET_SEED", &val)?;
    }
    if let Ok(val) = std::env::var("LABLENS_DATASET_DAYS") {
        config.dataset.days = parse_override("LABLENS_DATASET_DAYS", &val)?;
    }

    // Metrics overrides
    if let Ok(val) = std::env::var("LABLENS_METRICS_ON_TIME_THRESHOLD_MINUTES") {
        config.metrics.on_time_threshold_minutes =
            parse_override("LABLENS_METRICS_ON_TIME_THRESHOLD_MINUTES", &val)?;
    }
    if let Ok(val) = std::env::var("LABLENS_METRICS_DEFAULT_RANGE_DAYS") {
        config.metrics.default_range_days =
            Some(parse_override("LABLENS_METRICS_DEFAULT_RANGE_DAYS", &val)?);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("LABLENS_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("LABLENS_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("LABLENS_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
