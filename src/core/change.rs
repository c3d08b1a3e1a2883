//! Period-over-period change

use super::aggregate::KpiValues;
use serde::Serialize;
use std::fmt;

/// Direction of a change; zero change counts as an increase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeDirection {
    Increase,
    Decrease,
}

impl ChangeDirection {
    /// Arrow shown next to a metric card value
    pub fn arrow(&self) -> &'static str {
        match self {
            ChangeDirection::Increase => "↗",
            ChangeDirection::Decrease => "↘",
        }
    }
}

impl fmt::Display for ChangeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeDirection::Increase => f.write_str("increase"),
            ChangeDirection::Decrease => f.write_str("decrease"),
        }
    }
}

/// Rounded magnitude and direction of a percentage change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Change {
    pub magnitude_percent: u32,
    pub direction: ChangeDirection,
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}%", self.direction.arrow(), self.magnitude_percent)
    }
}

/// Compares a current value with the previous period's value
///
/// A zero previous value yields no change rather than an infinite one.
///
/// # Examples
///
/// ```
/// use lablens::core::change::{compute_change, ChangeDirection};
///
/// let change = compute_change(10.0, 10.0);
/// assert_eq!(change.magnitude_percent, 0);
/// assert_eq!(change.direction, ChangeDirection::Increase);
///
/// let change = compute_change(75.0, 100.0);
/// assert_eq!(change.magnitude_percent, 25);
/// assert_eq!(change.direction, ChangeDirection::Decrease);
/// ```
pub fn compute_change(current: f64, previous: f64) -> Change {
    let percent_change = if previous == 0.0 {
        0.0
    } else {
        (current - previous) / previous * 100.0
    };

    let direction = if percent_change >= 0.0 {
        ChangeDirection::Increase
    } else {
        ChangeDirection::Decrease
    };

    Change {
        magnitude_percent: super::aggregate::round_to_u32(percent_change.abs()),
        direction,
    }
}

/// Changes for each summary KPI card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SummaryChanges {
    pub total_samples: Change,
    pub completed: Change,
    pub processing_time: Change,
    pub on_time_rate: Change,
}

impl SummaryChanges {
    /// Compares unrounded KPIs of the current and previous periods
    pub fn between(current: &KpiValues, previous: &KpiValues) -> Self {
        Self {
            total_samples: compute_change(
                current.total_count as f64,
                previous.total_count as f64,
            ),
            completed: compute_change(
                current.completed_count as f64,
                previous.completed_count as f64,
            ),
            processing_time: compute_change(
                current.avg_processing_minutes,
                previous.avg_processing_minutes,
            ),
            on_time_rate: compute_change(
                current.on_time_rate_percent,
                previous.on_time_rate_percent,
            ),
        }
    }
}
