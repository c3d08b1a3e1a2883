//! Domain error types
//!
//! This module defines the error hierarchy for LabLens. The metrics engine
//! itself is total; errors only arise while constructing domain values,
//! loading datasets, or reading configuration.

use thiserror::Error;

/// Main LabLens error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum LabError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A domain value violated one of its invariants
    #[error("Validation error: {0}")]
    Validation(String),

    /// The sample dataset is inconsistent (dangling references, duplicate ids)
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl LabError {
    /// Process exit code the CLI reports for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            LabError::Configuration(_) => 2,
            LabError::Validation(_) | LabError::Dataset(_) | LabError::Serialization(_) => 3,
            LabError::Io(_) | LabError::Other(_) => 5,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for LabError {
    fn from(err: std::io::Error) -> Self {
        LabError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for LabError {
    fn from(err: serde_json::Error) -> Self {
        LabError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for LabError {
    fn from(err: toml::de::Error) -> Self {
        LabError::Configuration(format!("TOML parse error: {err}"))
    }
}
