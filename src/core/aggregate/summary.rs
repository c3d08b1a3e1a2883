//! Headline KPIs

use super::{percent, round_to_u32, MinutesTally};
use crate::domain::Sample;
use serde::Serialize;

/// Completed samples at or under this many minutes count as on time
pub const ON_TIME_THRESHOLD_MINUTES: u32 = 120;

/// Unrounded KPI values, used for period-over-period comparison
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct KpiValues {
    pub total_count: usize,
    pub completed_count: usize,
    pub avg_processing_minutes: f64,
    pub on_time_rate_percent: f64,
}

impl KpiValues {
    /// Computes raw KPIs in a single pass
    pub fn compute<'a, I>(samples: I, on_time_threshold_minutes: u32) -> Self
    where
        I: IntoIterator<Item = &'a Sample>,
    {
        let mut total_count = 0;
        let mut completed = MinutesTally::default();
        let mut on_time = 0;

        for sample in samples {
            total_count += 1;
            if !sample.is_completed() {
                continue;
            }
            if let Some(minutes) = sample.processing_minutes() {
                completed.add(minutes);
                if minutes <= on_time_threshold_minutes {
                    on_time += 1;
                }
            }
        }

        // max(completed, 1) reports "no completed samples" as 0 %
        let on_time_rate_percent = percent(on_time, completed.count().max(1));

        Self {
            total_count,
            completed_count: completed.count(),
            avg_processing_minutes: completed.mean(),
            on_time_rate_percent,
        }
    }
}

/// Summary KPI cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    pub total_count: usize,
    pub completed_count: usize,
    pub avg_processing_minutes: u32,
    pub on_time_rate_percent: u32,
}

impl From<&KpiValues> for Summary {
    fn from(values: &KpiValues) -> Self {
        Self {
            total_count: values.total_count,
            completed_count: values.completed_count,
            avg_processing_minutes: round_to_u32(values.avg_processing_minutes),
            on_time_rate_percent: round_to_u32(values.on_time_rate_percent),
        }
    }
}

/// Builds the summary using the standard 120 minute on-time threshold
///
/// # Examples
///
/// ```
/// use lablens::core::aggregate::build_summary;
/// use lablens::domain::Sample;
///
/// let summary = build_summary(&Vec::<Sample>::new());
/// assert_eq!(summary.total_count, 0);
/// assert_eq!(summary.on_time_rate_percent, 0);
/// ```
pub fn build_summary<'a, I>(samples: I) -> Summary
where
    I: IntoIterator<Item = &'a Sample>,
{
    build_summary_with_threshold(samples, ON_TIME_THRESHOLD_MINUTES)
}

/// Builds the summary with a custom on-time threshold
pub fn build_summary_with_threshold<'a, I>(samples: I, on_time_threshold_minutes: u32) -> Summary
where
    I: IntoIterator<Item = &'a Sample>,
{
    Summary::from(&KpiValues::compute(samples, on_time_threshold_minutes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Priority, SampleStatus};
    use chrono::{TimeZone, Utc};

    fn completed(id: &str, minutes: u32) -> Sample {
        base(id)
            .status(SampleStatus::Completed)
            .completed_after_minutes(minutes)
            .build()
            .unwrap()
    }

    fn open(id: &str, status: SampleStatus) -> Sample {
        base(id).status(status).build().unwrap()
    }

    fn base(id: &str) -> crate::domain::SampleBuilder {
        Sample::builder()
            .id(id)
            .sample_number(format!("S-{id}"))
            .submitted_at(Utc.with_ymd_and_hms(2024, 3, 10, 7, 15, 0).unwrap())
            .priority(Priority::Normal)
            .sample_type("Blood Chemistry")
            .location_id("loc-001")
            .technician("Dr. Sarah Johnson")
            .department("Clinical Chemistry")
    }

    #[test]
    fn test_same_day_scenario() {
        let samples = vec![
            completed("a", 60),
            completed("b", 90),
            open("c", SampleStatus::InProgress),
        ];

        let summary = build_summary(&samples);

        assert_eq!(
            summary,
            Summary {
                total_count: 3,
                completed_count: 2,
                avg_processing_minutes: 75,
                on_time_rate_percent: 100,
            }
        );
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let summary = build_summary(&Vec::<Sample>::new());
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn test_no_completed_samples_reports_zero_rate() {
        let samples = vec![open("a", SampleStatus::Received), open("b", SampleStatus::OnHold)];
        let values = KpiValues::compute(&samples, ON_TIME_THRESHOLD_MINUTES);

        assert_eq!(values.total_count, 2);
        assert_eq!(values.on_time_rate_percent, 0.0);
        assert!(!values.avg_processing_minutes.is_nan());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let samples = vec![completed("a", 120), completed("b", 121), completed("c", 200)];
        let summary = build_summary(&samples);

        // 1 of 3 = 33.33 %
        assert_eq!(summary.on_time_rate_percent, 33);
        assert_eq!(summary.avg_processing_minutes, 147);
    }

    #[test]
    fn test_custom_threshold() {
        let samples = vec![completed("a", 45), completed("b", 75)];
        assert_eq!(build_summary_with_threshold(&samples, 60).on_time_rate_percent, 50);
    }

    #[test]
    fn test_mean_rounds_half_away_from_zero() {
        let samples = vec![completed("a", 60), completed("b", 61)];
        assert_eq!(build_summary(&samples).avg_processing_minutes, 61);
    }
}
