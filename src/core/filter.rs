//! Sample selection
//!
//! [`filter_by_window`] selects samples submitted inside an instant window.
//! [`SampleFilter`] narrows a dataset by location, sample type, priority and
//! status before any windowing happens. Both are single pass, borrow their
//! input and keep the original relative order.

use crate::domain::{InstantWindow, LocationId, Priority, Sample, SampleStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Returns every sample whose submission instant lies in `window`, both ends inclusive
///
/// # Examples
///
/// ```
/// use lablens::core::filter::filter_by_window;
/// use lablens::domain::DateWindow;
///
/// let window = DateWindow::parse("2024-03-10", "2024-03-12").unwrap().to_instants();
/// let selected = filter_by_window(&[], &window);
/// assert!(selected.is_empty());
/// ```
pub fn filter_by_window<'a, I>(samples: I, window: &InstantWindow) -> Vec<&'a Sample>
where
    I: IntoIterator<Item = &'a Sample>,
{
    samples
        .into_iter()
        .filter(|sample| window.contains(sample.submitted_at()))
        .collect()
}

/// Dimension filter over samples
///
/// An empty set means "no restriction" for that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleFilter {
    #[serde(default)]
    pub locations: HashSet<LocationId>,

    #[serde(default)]
    pub sample_types: HashSet<String>,

    #[serde(default)]
    pub priorities: HashSet<Priority>,

    #[serde(default)]
    pub statuses: HashSet<SampleStatus>,
}

impl SampleFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(mut self, location: LocationId) -> Self {
        self.locations.insert(location);
        self
    }

    pub fn with_sample_type(mut self, sample_type: impl Into<String>) -> Self {
        self.sample_types.insert(sample_type.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priorities.insert(priority);
        self
    }

    pub fn with_status(mut self, status: SampleStatus) -> Self {
        self.statuses.insert(status);
        self
    }

    /// True when no dimension is restricted
    pub fn is_unrestricted(&self) -> bool {
        self.locations.is_empty()
            && self.sample_types.is_empty()
            && self.priorities.is_empty()
            && self.statuses.is_empty()
    }

    pub fn matches(&self, sample: &Sample) -> bool {
        (self.locations.is_empty() || self.locations.contains(sample.location_id()))
            && (self.sample_types.is_empty() || self.sample_types.contains(sample.sample_type()))
            && (self.priorities.is_empty() || self.priorities.contains(&sample.priority()))
            && (self.statuses.is_empty() || self.statuses.contains(&sample.status()))
    }

    /// Returns the matching samples in their original order
    pub fn apply<'a, I>(&self, samples: I) -> Vec<&'a Sample>
    where
        I: IntoIterator<Item = &'a Sample>,
    {
        samples
            .into_iter()
            .filter(|sample| self.matches(sample))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DateWindow;
    use chrono::{DateTime, TimeZone, Utc};

    fn sample(id: &str, at: DateTime<Utc>, location: &str, status: SampleStatus) -> Sample {
        let mut builder = Sample::builder()
            .id(id)
            .sample_number(format!("S-{id}"))
            .submitted_at(at)
            .priority(Priority::Normal)
            .status(status)
            .sample_type("Histology")
            .location_id(location)
            .technician("Jessica Brown")
            .department("Pathology");
        if status == SampleStatus::Completed {
            builder = builder.completed_after_minutes(45);
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let window = DateWindow::parse("2024-03-10", "2024-03-11").unwrap().to_instants();
        let samples = vec![
            sample("before", Utc.with_ymd_and_hms(2024, 3, 9, 23, 59, 59).unwrap(), "loc-001", SampleStatus::Received),
            sample("first", window.start, "loc-001", SampleStatus::Received),
            sample("last", window.end, "loc-001", SampleStatus::Received),
            sample("after", Utc.with_ymd_and_hms(2024, 3, 12, 0, 0, 0).unwrap(), "loc-001", SampleStatus::Received),
        ];

        let ids: Vec<_> = filter_by_window(&samples, &window)
            .iter()
            .map(|s| s.id().as_str())
            .collect();
        assert_eq!(ids, vec!["first", "last"]);
    }

    #[test]
    fn test_window_filter_preserves_order() {
        let window = DateWindow::parse("2024-03-10", "2024-03-10").unwrap().to_instants();
        let samples = vec![
            sample("c", Utc.with_ymd_and_hms(2024, 3, 10, 18, 0, 0).unwrap(), "loc-001", SampleStatus::Received),
            sample("a", Utc.with_ymd_and_hms(2024, 3, 10, 6, 0, 0).unwrap(), "loc-001", SampleStatus::Received),
            sample("b", Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap(), "loc-001", SampleStatus::Received),
        ];

        let ids: Vec<_> = filter_by_window(&samples, &window)
            .iter()
            .map(|s| s.id().as_str())
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_unrestricted_filter_matches_everything() {
        let at = Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap();
        let samples = vec![
            sample("a", at, "loc-001", SampleStatus::Received),
            sample("b", at, "loc-002", SampleStatus::Completed),
        ];

        let filter = SampleFilter::new();
        assert!(filter.is_unrestricted());
        assert_eq!(filter.apply(&samples).len(), 2);
    }

    #[test]
    fn test_dimension_filters_combine() {
        let at = Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap();
        let samples = vec![
            sample("a", at, "loc-001", SampleStatus::Received),
            sample("b", at, "loc-002", SampleStatus::Completed),
            sample("c", at, "loc-002", SampleStatus::OnHold),
        ];

        let filter = SampleFilter::new()
            .with_location(LocationId::new("loc-002").unwrap())
            .with_status(SampleStatus::Completed);
        let ids: Vec<_> = filter.apply(&samples).iter().map(|s| s.id().as_str()).collect();
        assert_eq!(ids, vec!["b"]);

        let by_type = SampleFilter::new().with_sample_type("Cytology");
        assert!(by_type.apply(&samples).is_empty());
    }
}
