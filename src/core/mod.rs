//! Core metrics engine for LabLens.
//!
//! # Modules
//!
//! - [`period`] - Current and comparison period resolution
//! - [`filter`] - Window and attribute filtering
//! - [`aggregate`] - Daily series, summary KPIs and breakdown tables
//! - [`change`] - Period-over-period change indicators
//! - [`table`] - Sortable tabular views over breakdown rows
//! - [`dashboard`] - Orchestration of a full dashboard evaluation
//!
//! # Evaluation Workflow
//!
//! 1. **Filter**: Restrict samples by location, type, priority and status
//! 2. **Resolve**: Derive the current window and the equal-length previous window
//! 3. **Select**: Keep samples submitted inside each window
//! 4. **Aggregate**: Compute the series, KPIs and breakdowns for the current window
//! 5. **Compare**: Derive change indicators from unrounded KPIs of both windows
//!
//! # Example
//!
//! ```rust
//! use lablens::core::dashboard::{DashboardEngine, DashboardRequest};
//! use lablens::data::MockDataGenerator;
//! use lablens::domain::DateWindow;
//! use chrono::{NaiveDate, TimeZone, Utc};
//!
//! let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
//! let store = MockDataGenerator::new(42).days(30).now(now).into_store().unwrap();
//!
//! let window = DateWindow::parse("2024-03-20", "2024-03-26").unwrap();
//! let request = DashboardRequest::new(Some(window))
//!     .with_today(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
//! let report = DashboardEngine::new(&store).build(&request);
//!
//! assert_eq!(report.series.len(), 7);
//! println!("Total: {}", report.summary.total_count);
//! ```

pub mod aggregate;
pub mod change;
pub mod dashboard;
pub mod filter;
pub mod period;
pub mod table;
