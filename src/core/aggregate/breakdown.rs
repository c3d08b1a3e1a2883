//! Per-location and per-sample-type breakdowns
//!
//! Unlike the daily series, breakdowns only list entries that are relevant:
//! inactive locations are dropped, and so are sample types with no samples.

use super::{percent, round_to_u32, MinutesTally};
use crate::domain::{Location, LocationId, Sample};
use serde::Serialize;
use std::collections::HashMap;

/// Throughput of one active location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationMetric {
    pub location_id: LocationId,
    pub location_name: String,

    /// Completed samples processed at the location
    pub samples_processed: usize,

    pub avg_processing_minutes: u32,

    /// Processed samples as a share of capacity, capped at 100
    pub utilization_percent: u32,
}

/// Throughput of one sample type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeMetric {
    pub sample_type: String,

    /// All samples of this type, regardless of status
    pub count: usize,

    pub completed_count: usize,
    pub avg_processing_minutes: u32,
    pub completion_rate_percent: u32,
}

/// Builds one entry per active location, in catalog order
///
/// Only completed samples count towards a location. A zero capacity yields
/// 0 % utilization.
pub fn build_location_metrics<'a, I>(samples: I, locations: &[Location]) -> Vec<LocationMetric>
where
    I: IntoIterator<Item = &'a Sample>,
{
    let mut by_location: HashMap<&LocationId, MinutesTally> = HashMap::new();
    for sample in samples {
        if !sample.is_completed() {
            continue;
        }
        if let Some(minutes) = sample.processing_minutes() {
            by_location
                .entry(sample.location_id())
                .or_default()
                .add(minutes);
        }
    }

    locations
        .iter()
        .filter(|location| location.is_active)
        .map(|location| {
            let tally = by_location.get(&location.id).copied().unwrap_or_default();
            let utilization = if location.capacity == 0 {
                0
            } else {
                round_to_u32(tally.count() as f64 / f64::from(location.capacity) * 100.0).min(100)
            };

            LocationMetric {
                location_id: location.id.clone(),
                location_name: location.name.clone(),
                samples_processed: tally.count(),
                avg_processing_minutes: tally.rounded_mean(),
                utilization_percent: utilization,
            }
        })
        .collect()
}

#[derive(Debug, Default)]
struct TypeTally {
    count: usize,
    completed: MinutesTally,
}

/// Builds one entry per known sample type that has at least one sample
///
/// Entries keep the order of `known_types`. Samples whose type is not in
/// `known_types` are ignored.
pub fn build_type_metrics<'a, I, S>(samples: I, known_types: &[S]) -> Vec<TypeMetric>
where
    I: IntoIterator<Item = &'a Sample>,
    S: AsRef<str>,
{
    let mut by_type: HashMap<&str, TypeTally> = HashMap::new();
    for sample in samples {
        let tally = by_type.entry(sample.sample_type()).or_default();
        tally.count += 1;
        if sample.is_completed() {
            if let Some(minutes) = sample.processing_minutes() {
                tally.completed.add(minutes);
            }
        }
    }

    known_types
        .iter()
        .filter_map(|sample_type| {
            let sample_type = sample_type.as_ref();
            let tally = by_type.get(sample_type)?;
            if tally.count == 0 {
                return None;
            }

            Some(TypeMetric {
                sample_type: sample_type.to_string(),
                count: tally.count,
                completed_count: tally.completed.count(),
                avg_processing_minutes: tally.completed.rounded_mean(),
                completion_rate_percent: round_to_u32(percent(
                    tally.completed.count(),
                    tally.count,
                )),
            })
        })
        .collect()
}
