//! Daily time series

use super::MinutesTally;
use crate::domain::{DateWindow, Sample};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// One day of the trend chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,

    /// Samples submitted that day
    pub submitted_count: usize,

    /// Samples submitted that day that are now completed
    pub completed_count: usize,

    /// Rounded mean processing time of that day's completed samples, 0 if none
    pub avg_processing_minutes: u32,
}

#[derive(Debug, Default)]
struct DayTally {
    submitted: usize,
    completed: MinutesTally,
}

/// Builds one point per calendar day of `window`, oldest first
///
/// Days without samples are kept as zero points so the sequence never has
/// gaps. Samples submitted outside the window are ignored.
pub fn build_series<'a, I>(samples: I, window: &DateWindow) -> Vec<ChartPoint>
where
    I: IntoIterator<Item = &'a Sample>,
{
    let mut days: HashMap<NaiveDate, DayTally> = HashMap::new();

    for sample in samples {
        let day = sample.submitted_at().date_naive();
        if !window.contains_date(day) {
            continue;
        }

        let tally = days.entry(day).or_default();
        tally.submitted += 1;
        if sample.is_completed() {
            if let Some(minutes) = sample.processing_minutes() {
                tally.completed.add(minutes);
            }
        }
    }

    window
        .days()
        .map(|date| match days.get(&date) {
            Some(tally) => ChartPoint {
                date,
                submitted_count: tally.submitted,
                completed_count: tally.completed.count(),
                avg_processing_minutes: tally.completed.rounded_mean(),
            },
            None => ChartPoint {
                date,
                submitted_count: 0,
                completed_count: 0,
                avg_processing_minutes: 0,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::filter_by_window;
    use crate::domain::{Priority, SampleStatus};
    use chrono::{TimeZone, Utc};

    fn sample(id: &str, day: u32, hour: u32, minutes: Option<u32>) -> Sample {
        let builder = Sample::builder()
            .id(id)
            .sample_number(format!("S-{id}"))
            .submitted_at(Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap())
            .priority(Priority::Low)
            .sample_type("Immunology")
            .location_id("loc-003")
            .technician("Alex Martinez")
            .department("Hematology");
        let builder = match minutes {
            Some(m) => builder
                .status(SampleStatus::Completed)
                .completed_after_minutes(m),
            None => builder.status(SampleStatus::InProgress),
        };
        builder.build().unwrap()
    }

    #[test]
    fn test_series_keeps_empty_days() {
        let window = DateWindow::parse("2024-03-10", "2024-03-14").unwrap();
        let samples = vec![sample("a", 10, 8, Some(30)), sample("b", 13, 9, None)];

        let series = build_series(&samples, &window);

        assert_eq!(series.len(), 5);
        let counts: Vec<_> = series.iter().map(|p| p.submitted_count).collect();
        assert_eq!(counts, vec![1, 0, 0, 1, 0]);
        assert!(series.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(series[1].avg_processing_minutes, 0);
    }

    #[test]
    fn test_series_daily_averages() {
        let window = DateWindow::parse("2024-03-10", "2024-03-10").unwrap();
        let samples = vec![
            sample("a", 10, 1, Some(60)),
            sample("b", 10, 2, Some(91)),
            sample("c", 10, 3, None),
        ];

        let series = build_series(&samples, &window);

        assert_eq!(
            series,
            vec![ChartPoint {
                date: window.start(),
                submitted_count: 3,
                completed_count: 2,
                avg_processing_minutes: 76,
            }]
        );
    }

    #[test]
    fn test_series_ignores_samples_outside_window() {
        let window = DateWindow::parse("2024-03-11", "2024-03-12").unwrap();
        let samples = vec![sample("a", 10, 23, None), sample("b", 13, 0, None)];

        let series = build_series(&samples, &window);
        assert!(series.iter().all(|p| p.submitted_count == 0));
    }

    #[test]
    fn test_series_counts_match_window_filter() {
        let window = DateWindow::parse("2024-03-09", "2024-03-12").unwrap();
        let samples: Vec<Sample> = (0..40)
            .map(|i| {
                let minutes = if i % 3 == 0 { None } else { Some(20 + i) };
                sample(&format!("s{i}"), 8 + (i % 6), i % 24, minutes)
            })
            .collect();

        let series = build_series(&samples, &window);
        let total: usize = series.iter().map(|p| p.submitted_count).sum();

        assert_eq!(total, filter_by_window(&samples, &window.to_instants()).len());
    }
}
