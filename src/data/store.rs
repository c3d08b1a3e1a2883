//! Sample store
//!
//! The [`SampleStore`] is the data context the engine reads from. It is
//! built once, validated once, and then only ever borrowed.

use super::generator::MockDataGenerator;
use crate::domain::catalog;
use crate::domain::{LabError, Location, LocationId, Result, Sample};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// JSON wire format of a dataset file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub locations: Vec<Location>,

    pub samples: Vec<Sample>,

    /// Sample type catalog; the built-in catalog when omitted
    #[serde(default = "catalog::sample_types")]
    pub sample_types: Vec<String>,
}

/// Immutable, validated collection of samples and the locations they reference
#[derive(Debug, Clone)]
pub struct SampleStore {
    locations: Vec<Location>,
    samples: Vec<Sample>,
    sample_types: Vec<String>,
}

impl SampleStore {
    /// Creates a store, checking that ids are unique and every sample
    /// references a known location
    ///
    /// # Errors
    ///
    /// Returns `LabError::Dataset` describing the first inconsistency found
    pub fn new(
        locations: Vec<Location>,
        samples: Vec<Sample>,
        sample_types: Vec<String>,
    ) -> Result<Self> {
        let mut location_ids: HashSet<&LocationId> = HashSet::with_capacity(locations.len());
        for location in &locations {
            if !location_ids.insert(&location.id) {
                return Err(LabError::Dataset(format!(
                    "Duplicate location id: {}",
                    location.id
                )));
            }
        }

        let mut sample_ids = HashSet::with_capacity(samples.len());
        for sample in &samples {
            if !sample_ids.insert(sample.id()) {
                return Err(LabError::Dataset(format!(
                    "Duplicate sample id: {}",
                    sample.id()
                )));
            }
            if !location_ids.contains(sample.location_id()) {
                return Err(LabError::Dataset(format!(
                    "Sample {} references unknown location {}",
                    sample.id(),
                    sample.location_id()
                )));
            }
        }

        let known_types: HashSet<&str> = sample_types.iter().map(String::as_str).collect();
        let uncatalogued = samples
            .iter()
            .filter(|s| !known_types.contains(s.sample_type()))
            .count();
        if uncatalogued > 0 {
            tracing::warn!(
                count = uncatalogued,
                "Samples with types outside the catalog are excluded from type breakdowns"
            );
        }

        tracing::debug!(
            locations = locations.len(),
            samples = samples.len(),
            sample_types = sample_types.len(),
            "Sample store created"
        );

        Ok(Self {
            locations,
            samples,
            sample_types,
        })
    }

    /// Creates a store using the built-in sample type catalog
    pub fn with_default_catalog(locations: Vec<Location>, samples: Vec<Sample>) -> Result<Self> {
        Self::new(locations, samples, catalog::sample_types())
    }

    /// Parses and validates a JSON dataset
    pub fn from_json_str(json: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(json)?;
        Self::from_dataset(dataset)
    }

    /// Loads and validates a JSON dataset file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            LabError::Dataset(format!("Failed to read dataset {}: {}", path.display(), e))
        })?;

        tracing::info!(path = %path.display(), "Loading dataset");
        Self::from_json_str(&contents)
    }

    /// Runs the mock generator and stores its output
    pub fn from_generator(generator: MockDataGenerator) -> Result<Self> {
        generator.into_store()
    }

    pub fn from_dataset(dataset: Dataset) -> Result<Self> {
        Self::new(dataset.locations, dataset.samples, dataset.sample_types)
    }

    /// Writes the store as a pretty-printed JSON dataset
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let dataset = Dataset {
            locations: self.locations.clone(),
            samples: self.samples.clone(),
            sample_types: self.sample_types.clone(),
        };
        let json = serde_json::to_string_pretty(&dataset)?;
        fs::write(path, json).map_err(|e| {
            LabError::Io(format!("Failed to write dataset {}: {}", path.display(), e))
        })?;
        Ok(())
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn sample_types(&self) -> &[String] {
        &self.sample_types
    }

    pub fn location(&self, id: &LocationId) -> Option<&Location> {
        self.locations.iter().find(|l| &l.id == id)
    }

    /// Number of samples per location id
    pub fn samples_per_location(&self) -> HashMap<&LocationId, usize> {
        let mut counts = HashMap::new();
        for sample in &self.samples {
            *counts.entry(sample.location_id()).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::default_locations;
    use crate::domain::{Priority, SampleStatus};
    use chrono::{TimeZone, Utc};
    use tempfile::NamedTempFile;

    fn sample(id: &str, location: &str) -> Sample {
        Sample::builder()
            .id(id)
            .sample_number(format!("S-{id}"))
            .submitted_at(Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap())
            .priority(Priority::Normal)
            .status(SampleStatus::Received)
            .sample_type("Serology")
            .location_id(location)
            .technician("Mike Chen")
            .department("Clinical Chemistry")
            .build()
            .unwrap()
    }

    #[test]
    fn test_store_rejects_unknown_location() {
        let result =
            SampleStore::with_default_catalog(default_locations(), vec![sample("a", "loc-404")]);
        assert!(matches!(result, Err(LabError::Dataset(_))));
    }

    #[test]
    fn test_store_rejects_duplicate_sample_ids() {
        let result = SampleStore::with_default_catalog(
            default_locations(),
            vec![sample("a", "loc-001"), sample("a", "loc-002")],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_store_accepts_inactive_location_references() {
        let store =
            SampleStore::with_default_catalog(default_locations(), vec![sample("a", "loc-005")])
                .unwrap();
        let inactive = store.location(store.samples()[0].location_id()).unwrap();
        assert!(!inactive.is_active);
        assert_eq!(store.samples_per_location().len(), 1);
    }

    #[test]
    fn test_json_round_trip_through_file() {
        let store = SampleStore::with_default_catalog(
            default_locations(),
            vec![sample("a", "loc-001"), sample("b", "loc-003")],
        )
        .unwrap();

        let file = NamedTempFile::new().unwrap();
        store.save_json(file.path()).unwrap();

        let loaded = SampleStore::from_json_file(file.path()).unwrap();
        assert_eq!(loaded.samples(), store.samples());
        assert_eq!(loaded.locations(), store.locations());
        assert_eq!(loaded.sample_types(), store.sample_types());
    }

    #[test]
    fn test_dataset_defaults_sample_types() {
        let json = r#"{
            "locations": [
                {"id": "loc-1", "name": "Lab", "code": "LAB", "department": "Core", "capacity": 10}
            ],
            "samples": []
        }"#;

        let store = SampleStore::from_json_str(json).unwrap();
        assert_eq!(store.sample_types().len(), catalog::SAMPLE_TYPES.len());
    }

    #[test]
    fn test_missing_file() {
        let result = SampleStore::from_json_file("does-not-exist.json");
        assert!(matches!(result, Err(LabError::Dataset(_))));
    }
}
