//! Metrics aggregation
//!
//! Pure functions that turn a filtered set of samples into the figures shown
//! on the dashboard:
//!
//! - [`series`] - gap-free daily time series
//! - [`summary`] - headline KPIs
//! - [`breakdown`] - per-location and per-sample-type tables
//!
//! Every function accepts any iterator of `&Sample` and makes a single pass.
//! Means are computed in floating point and rounded half away from zero
//! ([`f64::round`]). Empty inputs produce zeros, never NaN.

pub mod breakdown;
pub mod series;
pub mod summary;

pub use breakdown::{build_location_metrics, build_type_metrics, LocationMetric, TypeMetric};
pub use series::{build_series, ChartPoint};
pub use summary::{
    build_summary, build_summary_with_threshold, KpiValues, Summary, ON_TIME_THRESHOLD_MINUTES,
};

/// Running count and sum of processing minutes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct MinutesTally {
    count: usize,
    total: u64,
}

impl MinutesTally {
    pub(crate) fn add(&mut self, minutes: u32) {
        self.count += 1;
        self.total += u64::from(minutes);
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }

    /// Arithmetic mean, 0.0 when empty
    pub(crate) fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total as f64 / self.count as f64
        }
    }

    pub(crate) fn rounded_mean(&self) -> u32 {
        round_to_u32(self.mean())
    }
}

/// `part / whole * 100`, 0.0 when `whole` is zero
pub(crate) fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Rounds half away from zero and clamps into `u32`
pub(crate) fn round_to_u32(value: f64) -> u32 {
    // `as` saturates and maps NaN to 0
    value.round() as u32
}
