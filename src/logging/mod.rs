//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels
//! - Console output on stderr
//! - Local JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use lablens::logging::init_logging;
//! use lablens::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a dashboard report
///
/// # Example
///
/// ```no_run
/// use lablens::log_report_start;
/// use lablens::domain::DateWindow;
///
/// let current = DateWindow::parse("2024-03-10", "2024-03-12").unwrap();
/// let previous = DateWindow::parse("2024-03-07", "2024-03-09").unwrap();
/// log_report_start!(current, previous);
/// ```
#[macro_export]
macro_rules! log_report_start {
    ($current:expr, $previous:expr) => {
        tracing::info!(
            current = %$current,
            previous = %$previous,
            "Building dashboard report"
        );
    };
}

/// Log the completion of a dashboard report
///
/// # Example
///
/// ```no_run
/// use lablens::log_report_complete;
/// use std::time::Duration;
///
/// log_report_complete!(42, Duration::from_millis(3));
/// ```
#[macro_export]
macro_rules! log_report_complete {
    ($count:expr, $duration:expr) => {
        tracing::info!(
            samples = $count,
            duration_ms = $duration.as_millis() as u64,
            "Dashboard report completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use lablens::log_error_with_context;
/// use lablens::domain::LabError;
///
/// let error = LabError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
