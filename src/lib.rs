// LabLens - Laboratory Throughput Analytics
// Copyright (c) 2025 LabLens Contributors
// Licensed under the MIT License

//! # LabLens - Laboratory Throughput Analytics
//!
//! LabLens computes the throughput metrics behind a laboratory operations
//! dashboard: how many samples arrived and finished, how long processing took,
//! how often it finished on time, and how each location and sample type is
//! performing compared with the preceding period.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Resolving** a requested date range and its equal-length comparison period
//! - **Filtering** samples by submission window, location, type, priority and status
//! - **Aggregating** daily series, summary KPIs and per-location/per-type breakdowns
//! - **Comparing** periods with percentage change indicators
//!
//! ## Architecture
//!
//! LabLens follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Metrics engine (periods, filters, aggregation, changes, tables)
//! - [`data`] - Sample store and seeded mock data generator
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust
//! use lablens::core::dashboard::{DashboardEngine, DashboardRequest};
//! use lablens::data::MockDataGenerator;
//! use lablens::domain::DateWindow;
//! use chrono::{NaiveDate, TimeZone, Utc};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
//! let store = MockDataGenerator::new(42).days(30).now(now).into_store()?;
//!
//! let request = DashboardRequest::new(Some(DateWindow::parse("2024-03-24", "2024-03-30")?))
//!     .with_today(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
//! let report = DashboardEngine::new(&store).build(&request);
//!
//! println!(
//!     "{} samples, {}% on time ({})",
//!     report.summary.total_count,
//!     report.summary.on_time_rate_percent,
//!     report.changes.on_time_rate
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`domain::LabError`] through the
//! [`domain::Result`] alias. The aggregation functions themselves are total:
//! empty inputs produce zeros.
//!
//! ## Logging
//!
//! LabLens uses structured logging with the `tracing` crate. See
//! [`logging::init_logging`].

pub mod cli;
pub mod config;
pub mod core;
pub mod data;
pub mod domain;
pub mod logging;
