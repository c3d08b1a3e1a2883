//! Dashboard orchestration
//!
//! Ties the pure aggregation functions together: applies the user's filters,
//! resolves the comparison periods, and computes every dashboard figure
//! against a borrowed [`SampleStore`].

use super::aggregate::{
    build_location_metrics, build_series, build_type_metrics, ChartPoint, KpiValues,
    LocationMetric, Summary, TypeMetric, ON_TIME_THRESHOLD_MINUTES,
};
use super::change::SummaryChanges;
use super::filter::{filter_by_window, SampleFilter};
use super::period::{resolve_periods, Periods};
use crate::data::SampleStore;
use crate::domain::DateWindow;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::time::Instant;

/// Inputs for one dashboard evaluation
#[derive(Debug, Clone)]
pub struct DashboardRequest {
    /// Requested calendar window, `None` compares today with yesterday
    pub window: Option<DateWindow>,

    /// Location, type, priority and status restrictions
    pub filter: SampleFilter,

    /// The date the default window is anchored on
    pub today: NaiveDate,
}

impl DashboardRequest {
    /// Unfiltered request for the given window, anchored on the current UTC date
    pub fn new(window: Option<DateWindow>) -> Self {
        Self {
            window,
            filter: SampleFilter::default(),
            today: Utc::now().date_naive(),
        }
    }

    pub fn with_filter(mut self, filter: SampleFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }
}

/// Everything the dashboard shows for one evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub periods: Periods,
    pub summary: Summary,
    pub previous_summary: Summary,
    pub changes: SummaryChanges,
    pub series: Vec<ChartPoint>,
    pub locations: Vec<LocationMetric>,
    pub types: Vec<TypeMetric>,
}

/// Computes dashboard reports over a sample store
#[derive(Debug, Clone, Copy)]
pub struct DashboardEngine<'a> {
    store: &'a SampleStore,
    on_time_threshold_minutes: u32,
}

impl<'a> DashboardEngine<'a> {
    pub fn new(store: &'a SampleStore) -> Self {
        Self {
            store,
            on_time_threshold_minutes: ON_TIME_THRESHOLD_MINUTES,
        }
    }

    /// Overrides the 120 minute on-time threshold
    pub fn with_on_time_threshold(mut self, minutes: u32) -> Self {
        self.on_time_threshold_minutes = minutes;
        self
    }

    /// Builds the full report for a request
    ///
    /// Series and breakdowns cover the current period only. The previous
    /// period feeds the change indicators.
    pub fn build(&self, request: &DashboardRequest) -> DashboardReport {
        let started = Instant::now();
        let periods = resolve_periods(request.window.as_ref(), request.today);
        crate::log_report_start!(periods.current_days, periods.previous_days);

        let filtered = request.filter.apply(self.store.samples());
        let current = filter_by_window(filtered.iter().copied(), &periods.current);
        let previous = filter_by_window(filtered.iter().copied(), &periods.previous);

        tracing::debug!(
            matched = filtered.len(),
            current = current.len(),
            previous = previous.len(),
            "Selected samples for comparison periods"
        );

        let current_kpis =
            KpiValues::compute(current.iter().copied(), self.on_time_threshold_minutes);
        let previous_kpis =
            KpiValues::compute(previous.iter().copied(), self.on_time_threshold_minutes);

        let report = DashboardReport {
            periods,
            summary: Summary::from(&current_kpis),
            previous_summary: Summary::from(&previous_kpis),
            changes: SummaryChanges::between(&current_kpis, &previous_kpis),
            series: build_series(current.iter().copied(), &periods.current_days),
            locations: build_location_metrics(current.iter().copied(), self.store.locations()),
            types: build_type_metrics(current.iter().copied(), self.store.sample_types()),
        };

        crate::log_report_complete!(report.summary.total_count, started.elapsed());
        report
    }
}
