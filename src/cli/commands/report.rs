//! Report command implementation
//!
//! This module implements the `report` command, which evaluates the
//! dashboard for a date range and prints it as text or JSON.

use crate::config::{load_config, load_config_or_default, DatasetSource, LabConfig};
use crate::core::dashboard::{DashboardEngine, DashboardReport, DashboardRequest};
use crate::core::filter::SampleFilter;
use crate::core::table::{location_table, type_table, SortDirection};
use crate::data::{MockDataGenerator, SampleStore};
use crate::domain::window::{end_of_day, parse_date};
use crate::domain::{DateWindow, LabError, LocationId, Priority, Result, SampleStatus};
use chrono::{NaiveDate, Utc};
use clap::{Args, ValueEnum};
use std::fmt::Write as _;

/// Output format for the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable dashboard
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Arguments for the report command
#[derive(Args, Debug, Default)]
pub struct ReportArgs {
    /// First day of the range (YYYY-MM-DD)
    #[arg(long, requires = "end", conflicts_with = "last_days")]
    pub start: Option<String>,

    /// Last day of the range, inclusive (YYYY-MM-DD)
    #[arg(long, requires = "start")]
    pub end: Option<String>,

    /// Quick range: the last N days through today
    #[arg(long, value_name = "N", conflicts_with = "end")]
    pub last_days: Option<u32>,

    /// Date the default range is anchored on (defaults to the current UTC date)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub today: Option<String>,

    /// Restrict to location id(s) (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub location: Vec<String>,

    /// Restrict to sample type(s) (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub sample_type: Vec<String>,

    /// Restrict to priority(ies) (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub priority: Vec<Priority>,

    /// Restrict to status(es) (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub status: Vec<SampleStatus>,

    /// Sort the breakdown tables by column name
    #[arg(long, value_name = "COLUMN")]
    pub sort_by: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort_by")]
    pub desc: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl ReportArgs {
    /// Execute the report command
    ///
    /// `explicit_config` is false when `config_path` is the built-in default,
    /// in which case a missing file means "use defaults".
    pub fn execute(&self, config_path: &str, explicit_config: bool) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Starting report command");

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

        let report = match self.build_report(&config) {
            Ok(report) => report,
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to build report");
                eprintln!("❌ {e}");
                return Ok(e.exit_code());
            }
        };

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Text => match self.render_text(&report) {
                Some(text) => print!("{text}"),
                None => {
                    eprintln!(
                        "❌ Unknown sort column '{}'",
                        self.sort_by.as_deref().unwrap_or_default()
                    );
                    return Ok(2);
                }
            },
        }

        Ok(0)
    }

    /// Resolves the request, loads the dataset and evaluates the dashboard
    ///
    /// Mock data is generated up to the end of the request's anchor day, so
    /// the same seed and `--today` always produce the same report.
    pub fn build_report(&self, config: &LabConfig) -> Result<DashboardReport> {
        let request = self.request(config)?;
        let store = load_store(config, request.today)?;

        Ok(DashboardEngine::new(&store)
            .with_on_time_threshold(config.metrics.on_time_threshold_minutes)
            .build(&request))
    }

    /// Builds the engine request from the command-line arguments
    fn request(&self, config: &LabConfig) -> Result<DashboardRequest> {
        let today = match &self.today {
            Some(value) => parse_date(value)?,
            None => Utc::now().date_naive(),
        };

        let window = self.window(today, config.metrics.default_range_days)?;

        let mut filter = SampleFilter::new();
        for location in &self.location {
            let id = LocationId::new(location.as_str()).map_err(LabError::Validation)?;
            filter = filter.with_location(id);
        }
        for sample_type in &self.sample_type {
            filter = filter.with_sample_type(sample_type.as_str());
        }
        for priority in &self.priority {
            filter = filter.with_priority(*priority);
        }
        for status in &self.status {
            filter = filter.with_status(*status);
        }

        Ok(DashboardRequest::new(window)
            .with_filter(filter)
            .with_today(today))
    }

    fn window(&self, today: NaiveDate, default_range_days: Option<u32>) -> Result<Option<DateWindow>> {
        if let (Some(start), Some(end)) = (&self.start, &self.end) {
            return DateWindow::parse(start, end).map(Some);
        }
        self.last_days
            .or(default_range_days)
            .map(|days| DateWindow::trailing_days(days, today))
            .transpose()
    }

    /// Renders the text dashboard; `None` if `--sort-by` names no known column
    fn render_text(&self, report: &DashboardReport) -> Option<String> {
        let mut locations = location_table(report.locations.clone());
        let mut types = type_table(report.types.clone());

        if let Some(column) = &self.sort_by {
            let direction = if self.desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            let sorted_locations = locations.sort_by_name(column, direction);
            let sorted_types = types.sort_by_name(column, direction);
            if !sorted_locations && !sorted_types {
                return None;
            }
        }

        Some(format_report(report, &locations.render_text(), &types.render_text()))
    }
}

/// Builds the sample store named by the dataset configuration
///
/// Mock history ends at the last instant of `today`.
pub fn load_store(config: &LabConfig, today: NaiveDate) -> Result<SampleStore> {
    match config.dataset.source {
        DatasetSource::Mock => MockDataGenerator::new(config.dataset.seed)
            .days(config.dataset.days)
            .now(end_of_day(today))
            .into_store(),
        DatasetSource::File => {
            let path = config.dataset.path.as_ref().ok_or_else(|| {
                LabError::Configuration("dataset.path is required for file datasets".to_string())
            })?;
            SampleStore::from_json_file(path)
        }
    }
}

fn format_report(report: &DashboardReport, locations: &str, types: &str) -> String {
    let summary = &report.summary;
    let changes = &report.changes;
    let mut out = String::new();

    let _ = writeln!(out, "📊 Lab Throughput Dashboard");
    let _ = writeln!(
        out,
        "Period: {} (compared with {})",
        report.periods.current_days, report.periods.previous_days
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Summary:");
    let _ = writeln!(
        out,
        "  Total Samples:       {:>6}  {}",
        summary.total_count, changes.total_samples
    );
    let _ = writeln!(
        out,
        "  Completed:           {:>6}  {}",
        summary.completed_count, changes.completed
    );
    let _ = writeln!(
        out,
        "  Avg Processing Time: {:>4}m  {}",
        summary.avg_processing_minutes, changes.processing_time
    );
    let _ = writeln!(
        out,
        "  On-Time Rate:        {:>5}%  {}",
        summary.on_time_rate_percent, changes.on_time_rate
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Daily Throughput:");
    let _ = writeln!(out, "  {:<10}  {:>9}  {:>9}  {:>8}", "Date", "Submitted", "Completed", "Avg Time");
    for point in &report.series {
        let _ = writeln!(
            out,
            "  {:<10}  {:>9}  {:>9}  {:>7}m",
            point.date.to_string(),
            point.submitted_count,
            point.completed_count,
            point.avg_processing_minutes
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Locations:");
    out.push_str(locations);
    let _ = writeln!(out);
    let _ = writeln!(out, "Sample Types:");
    out.push_str(types);

    out
}
