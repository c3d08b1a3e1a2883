//! Seeded mock dataset generator
//!
//! Produces a realistic-looking sample history for demos and tests. All
//! randomness comes from a [`StdRng`] seeded by the caller, so the same
//! seed, day count, clock and catalogs always yield the same dataset.

use super::store::SampleStore;
use crate::domain::catalog;
use crate::domain::window::start_of_day;
use crate::domain::{LabError, Location, Priority, Result, Sample, SampleStatus};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Technicians assigned to generated samples
pub const TECHNICIANS: [&str; 8] = [
    "Dr. Sarah Johnson",
    "Mike Chen",
    "Emily Rodriguez",
    "David Kim",
    "Lisa Thompson",
    "Alex Martinez",
    "Jessica Brown",
    "Tom Wilson",
];

/// Default history length in days
pub const DEFAULT_DAYS: u32 = 90;

/// Generates mock sample histories
///
/// # Examples
///
/// ```
/// use lablens::data::generator::MockDataGenerator;
/// use chrono::{TimeZone, Utc};
///
/// let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
/// let store = MockDataGenerator::new(42).days(7).now(now).into_store().unwrap();
/// assert!(store.samples().len() >= 7 * 20);
/// ```
#[derive(Debug, Clone)]
pub struct MockDataGenerator {
    seed: u64,
    days: u32,
    now: DateTime<Utc>,
    locations: Vec<Location>,
    sample_types: Vec<String>,
}

impl MockDataGenerator {
    /// Generator with the default catalogs, 90 days of history, ending now
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            days: DEFAULT_DAYS,
            now: Utc::now(),
            locations: catalog::default_locations(),
            sample_types: catalog::sample_types(),
        }
    }

    pub fn days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    /// Fixes the generator's notion of "now"
    pub fn now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn locations(mut self, locations: Vec<Location>) -> Self {
        self.locations = locations;
        self
    }

    pub fn sample_types(mut self, sample_types: Vec<String>) -> Self {
        self.sample_types = sample_types;
        self
    }

    /// Generates the samples
    ///
    /// # Errors
    ///
    /// Returns `LabError::Validation` if there is no active location or no
    /// sample type to draw from.
    pub fn generate(&self) -> Result<Vec<Sample>> {
        let active: Vec<&Location> = self.locations.iter().filter(|l| l.is_active).collect();
        if active.is_empty() {
            return Err(LabError::Validation(
                "Mock data needs at least one active location".to_string(),
            ));
        }
        if self.sample_types.is_empty() {
            return Err(LabError::Validation(
                "Mock data needs at least one sample type".to_string(),
            ));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let first_day = (self.now - Duration::days(i64::from(self.days))).date_naive();
        let mut samples = Vec::new();

        for day in 0..self.days {
            let date = first_day + Duration::days(i64::from(day));
            let per_day: u32 = rng.gen_range(20..80);

            for i in 0..per_day {
                let submitted_at = start_of_day(date)
                    + Duration::hours(rng.gen_range(0..24))
                    + Duration::minutes(rng.gen_range(0..60));

                let location = *active.choose(&mut rng).unwrap_or(&active[0]);
                let sample_type = self
                    .sample_types
                    .choose(&mut rng)
                    .unwrap_or(&self.sample_types[0]);
                let technician = TECHNICIANS.choose(&mut rng).unwrap_or(&TECHNICIANS[0]);

                let processing_minutes: u32 = rng.gen_range(30..270);
                let would_complete_at =
                    submitted_at + Duration::minutes(i64::from(processing_minutes));

                let status = if would_complete_at <= self.now {
                    let roll: f64 = rng.gen();
                    if roll < 0.85 {
                        SampleStatus::Completed
                    } else if roll < 0.95 {
                        SampleStatus::InProgress
                    } else {
                        SampleStatus::OnHold
                    }
                } else if rng.gen_bool(0.7) {
                    SampleStatus::InProgress
                } else {
                    SampleStatus::Received
                };

                let priority = if rng.gen_bool(0.1) {
                    Priority::Urgent
                } else if rng.gen_bool(0.25) {
                    Priority::High
                } else if rng.gen_bool(0.75) {
                    Priority::Normal
                } else {
                    Priority::Low
                };

                let mut builder = Sample::builder()
                    .id(format!("sample-{day}-{i}"))
                    .sample_number(format!("S{}-{:03}", date.format("%Y%m%d"), i + 1))
                    .submitted_at(submitted_at)
                    .priority(priority)
                    .status(status)
                    .sample_type(sample_type.clone())
                    .location_id(location.id.as_str())
                    .technician(*technician)
                    .department(location.department.clone());
                if status == SampleStatus::Completed {
                    builder = builder.completed_after_minutes(processing_minutes);
                }

                samples.push(builder.build()?);
            }
        }

        tracing::info!(
            seed = self.seed,
            days = self.days,
            samples = samples.len(),
            "Generated mock samples"
        );

        Ok(samples)
    }

    /// Generates samples and wraps them in a validated store
    pub fn into_store(self) -> Result<SampleStore> {
        let samples = self.generate()?;
        SampleStore::new(self.locations, samples, self.sample_types)
    }
}
