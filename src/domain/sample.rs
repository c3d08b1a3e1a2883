//! Laboratory sample domain model
//!
//! A [`Sample`] is one lab test processing record. Samples are immutable
//! facts: the engine reads and aggregates them but never changes them.
//! Construction goes through [`SampleBuilder`], which enforces that the
//! completion timestamp and processing time exist exactly when the sample
//! is completed.

use super::errors::LabError;
use super::ids::{LocationId, SampleId};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sample priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Urgent,
    High,
    Normal,
    Low,
}

impl Priority {
    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Urgent => "urgent",
            Priority::High => "high",
            Priority::Normal => "normal",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "urgent" => Ok(Priority::Urgent),
            "high" => Ok(Priority::High),
            "normal" => Ok(Priority::Normal),
            "low" => Ok(Priority::Low),
            other => Err(format!(
                "Invalid priority '{other}'. Must be one of: urgent, high, normal, low"
            )),
        }
    }
}

/// Sample processing status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleStatus {
    Received,
    InProgress,
    Completed,
    OnHold,
    Cancelled,
}

impl SampleStatus {
    /// Canonical snake_case name
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleStatus::Received => "received",
            SampleStatus::InProgress => "in_progress",
            SampleStatus::Completed => "completed",
            SampleStatus::OnHold => "on_hold",
            SampleStatus::Cancelled => "cancelled",
        }
    }

    /// Completed and cancelled samples never change status again
    pub fn is_terminal(&self) -> bool {
        matches!(self, SampleStatus::Completed | SampleStatus::Cancelled)
    }
}

impl fmt::Display for SampleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SampleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "received" => Ok(SampleStatus::Received),
            "in_progress" => Ok(SampleStatus::InProgress),
            "completed" => Ok(SampleStatus::Completed),
            "on_hold" => Ok(SampleStatus::OnHold),
            "cancelled" => Ok(SampleStatus::Cancelled),
            other => Err(format!(
                "Invalid status '{other}'. Must be one of: received, in_progress, completed, on_hold, cancelled"
            )),
        }
    }
}

/// One lab test processing record
///
/// # Examples
///
/// ```
/// use lablens::domain::sample::{Priority, Sample, SampleStatus};
/// use chrono::{TimeZone, Utc};
///
/// let submitted = Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap();
/// let sample = Sample::builder()
///     .id("sample-1")
///     .sample_number("S20240310-001")
///     .submitted_at(submitted)
///     .completed_after_minutes(90)
///     .priority(Priority::Normal)
///     .status(SampleStatus::Completed)
///     .sample_type("Blood Chemistry")
///     .location_id("loc-001")
///     .technician("Mike Chen")
///     .department("Clinical Chemistry")
///     .build()
///     .unwrap();
///
/// assert_eq!(sample.processing_minutes(), Some(90));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SampleRecord")]
pub struct Sample {
    id: SampleId,
    sample_number: String,
    submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed_at: Option<DateTime<Utc>>,
    priority: Priority,
    status: SampleStatus,
    sample_type: String,
    location_id: LocationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    processing_minutes: Option<u32>,
    technician: String,
    department: String,
}

impl Sample {
    /// Creates a new builder for constructing a Sample
    pub fn builder() -> SampleBuilder {
        SampleBuilder::default()
    }

    pub fn id(&self) -> &SampleId {
        &self.id
    }

    /// Human-readable accession code
    pub fn sample_number(&self) -> &str {
        &self.sample_number
    }

    /// Instant the sample entered the system
    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// Instant processing finished; present iff the sample is completed
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn status(&self) -> SampleStatus {
        self.status
    }

    pub fn is_completed(&self) -> bool {
        self.status == SampleStatus::Completed
    }

    pub fn sample_type(&self) -> &str {
        &self.sample_type
    }

    /// Location the sample was processed at
    pub fn location_id(&self) -> &LocationId {
        &self.location_id
    }

    /// Whole minutes from submission to completion; present iff completed
    pub fn processing_minutes(&self) -> Option<u32> {
        self.processing_minutes
    }

    pub fn technician(&self) -> &str {
        &self.technician
    }

    pub fn department(&self) -> &str {
        &self.department
    }
}

/// Builder for constructing Sample instances
#[derive(Debug, Default)]
pub struct SampleBuilder {
    id: Option<String>,
    sample_number: Option<String>,
    submitted_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    completed_after_minutes: Option<u32>,
    processing_minutes: Option<u32>,
    priority: Option<Priority>,
    status: Option<SampleStatus>,
    sample_type: Option<String>,
    location_id: Option<String>,
    technician: Option<String>,
    department: Option<String>,
}

impl SampleBuilder {
    /// Creates a new SampleBuilder
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn sample_number(mut self, sample_number: impl Into<String>) -> Self {
        self.sample_number = Some(sample_number.into());
        self
    }

    pub fn submitted_at(mut self, submitted_at: DateTime<Utc>) -> Self {
        self.submitted_at = Some(submitted_at);
        self
    }

    /// Sets an explicit completion instant
    pub fn completed_at(mut self, completed_at: DateTime<Utc>) -> Self {
        self.completed_at = Some(completed_at);
        self
    }

    /// Sets the completion instant relative to the submission instant
    pub fn completed_after_minutes(mut self, minutes: u32) -> Self {
        self.completed_after_minutes = Some(minutes);
        self
    }

    /// Declares the expected processing time; checked against the timestamps
    pub fn processing_minutes(mut self, minutes: u32) -> Self {
        self.processing_minutes = Some(minutes);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn status(mut self, status: SampleStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn sample_type(mut self, sample_type: impl Into<String>) -> Self {
        self.sample_type = Some(sample_type.into());
        self
    }

    pub fn location_id(mut self, location_id: impl Into<String>) -> Self {
        self.location_id = Some(location_id.into());
        self
    }

    pub fn technician(mut self, technician: impl Into<String>) -> Self {
        self.technician = Some(technician.into());
        self
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Builds the Sample
    ///
    /// # Errors
    ///
    /// Returns `LabError::Validation` if a required field is missing, a
    /// descriptive field is blank, or the completion data does not match
    /// the status.
    pub fn build(self) -> Result<Sample, LabError> {
        let id = SampleId::new(required(self.id, "id")?).map_err(LabError::Validation)?;
        let submitted_at = required(self.submitted_at, "submitted_at")?;
        let status = required(self.status, "status")?;
        let priority = required(self.priority, "priority")?;
        let location_id = LocationId::new(required(self.location_id, "location_id")?)
            .map_err(LabError::Validation)?;

        let sample_number = non_blank(&id, "sample_number", self.sample_number)?;
        let sample_type = non_blank(&id, "sample_type", self.sample_type)?;
        let technician = non_blank(&id, "technician", self.technician)?;
        let department = non_blank(&id, "department", self.department)?;

        let completed_at = match (self.completed_at, self.completed_after_minutes) {
            (Some(_), Some(_)) => {
                return Err(LabError::Validation(format!(
                    "Sample {id}: set either completed_at or completed_after_minutes, not both"
                )))
            }
            (Some(at), None) => Some(at),
            (None, Some(minutes)) => Some(submitted_at + Duration::minutes(i64::from(minutes))),
            (None, None) => None,
        };

        let processing_minutes = match (status, completed_at) {
            (SampleStatus::Completed, Some(completed)) => {
                let elapsed = (completed - submitted_at).num_minutes();
                let minutes = u32::try_from(elapsed).map_err(|_| {
                    LabError::Validation(format!(
                        "Sample {id}: completion precedes submission"
                    ))
                })?;
                if let Some(declared) = self.processing_minutes {
                    if declared != minutes {
                        return Err(LabError::Validation(format!(
                            "Sample {id}: processing_minutes {declared} does not match elapsed time {minutes}"
                        )));
                    }
                }
                Some(minutes)
            }
            (SampleStatus::Completed, None) => {
                return Err(LabError::Validation(format!(
                    "Sample {id}: completed samples require a completion timestamp"
                )))
            }
            (other, Some(_)) => {
                return Err(LabError::Validation(format!(
                    "Sample {id}: status '{other}' cannot carry a completion timestamp"
                )))
            }
            (other, None) => {
                if self.processing_minutes.is_some() {
                    return Err(LabError::Validation(format!(
                        "Sample {id}: status '{other}' cannot carry a processing time"
                    )));
                }
                None
            }
        };

        Ok(Sample {
            id,
            sample_number,
            submitted_at,
            completed_at,
            priority,
            status,
            sample_type,
            location_id,
            processing_minutes,
            technician,
            department,
        })
    }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, LabError> {
    value.ok_or_else(|| LabError::Validation(format!("{field} is required")))
}

fn non_blank(id: &SampleId, field: &str, value: Option<String>) -> Result<String, LabError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(LabError::Validation(format!(
            "Sample {id}: {field} must not be empty"
        ))),
    }
}

/// Wire shape of a sample, validated into [`Sample`] on deserialization
#[derive(Debug, Deserialize)]
struct SampleRecord {
    id: String,
    sample_number: String,
    submitted_at: DateTime<Utc>,
    #[serde(default)]
    completed_at: Option<DateTime<Utc>>,
    priority: Priority,
    status: SampleStatus,
    sample_type: String,
    location_id: String,
    #[serde(default)]
    processing_minutes: Option<u32>,
    technician: String,
    department: String,
}

impl TryFrom<SampleRecord> for Sample {
    type Error = LabError;

    fn try_from(record: SampleRecord) -> Result<Self, Self::Error> {
        let mut builder = SampleBuilder::new()
            .id(record.id)
            .sample_number(record.sample_number)
            .submitted_at(record.submitted_at)
            .priority(record.priority)
            .status(record.status)
            .sample_type(record.sample_type)
            .location_id(record.location_id)
            .technician(record.technician)
            .department(record.department);

        if let Some(completed_at) = record.completed_at {
            builder = builder.completed_at(completed_at);
        }
        if let Some(minutes) = record.processing_minutes {
            builder = builder.processing_minutes(minutes);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn base() -> SampleBuilder {
        SampleBuilder::new()
            .id("sample-0-1")
            .sample_number("S20240310-001")
            .submitted_at(Utc.with_ymd_and_hms(2024, 3, 10, 9, 30, 0).unwrap())
            .priority(Priority::High)
            .sample_type("Urinalysis")
            .location_id("loc-002")
            .technician("Emily Rodriguez")
            .department("Microbiology")
    }

    #[test]
    fn test_completed_sample_derives_processing_minutes() {
        let sample = base()
            .status(SampleStatus::Completed)
            .completed_after_minutes(135)
            .build()
            .unwrap();

        assert_eq!(sample.processing_minutes(), Some(135));
        assert_eq!(
            sample.completed_at(),
            Some(Utc.with_ymd_and_hms(2024, 3, 10, 11, 45, 0).unwrap())
        );
        assert!(sample.status().is_terminal());
    }

    #[test]
    fn test_completed_sample_requires_completion() {
        let result = base().status(SampleStatus::Completed).build();
        assert!(matches!(result, Err(LabError::Validation(_))));
    }

    #[test]
    fn test_open_sample_rejects_completion() {
        let result = base()
            .status(SampleStatus::InProgress)
            .completed_after_minutes(10)
            .build();
        assert!(result.is_err());

        let result = base()
            .status(SampleStatus::OnHold)
            .processing_minutes(10)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_declared_processing_minutes_must_match() {
        let completed = Utc.with_ymd_and_hms(2024, 3, 10, 10, 30, 0).unwrap();
        let ok = base()
            .status(SampleStatus::Completed)
            .completed_at(completed)
            .processing_minutes(60)
            .build();
        assert!(ok.is_ok());

        let mismatch = base()
            .status(SampleStatus::Completed)
            .completed_at(completed)
            .processing_minutes(61)
            .build();
        assert!(mismatch.is_err());
    }

    #[test]
    fn test_completion_before_submission_rejected() {
        let result = base()
            .status(SampleStatus::Completed)
            .completed_at(Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap())
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_priority_rejected() {
        let result = SampleBuilder::new()
            .id("sample-0-2")
            .sample_number("S20240310-002")
            .submitted_at(Utc.with_ymd_and_hms(2024, 3, 10, 9, 30, 0).unwrap())
            .status(SampleStatus::Received)
            .sample_type("Urinalysis")
            .location_id("loc-002")
            .technician("Emily Rodriguez")
            .department("Microbiology")
            .build();
        assert!(matches!(result, Err(LabError::Validation(msg)) if msg.contains("priority")));
    }

    #[test]
    fn test_blank_technician_rejected() {
        let result = base()
            .status(SampleStatus::Received)
            .technician("")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_status_and_priority_parse() {
        assert_eq!("in-progress".parse::<SampleStatus>().unwrap(), SampleStatus::InProgress);
        assert_eq!("ON_HOLD".parse::<SampleStatus>().unwrap(), SampleStatus::OnHold);
        assert_eq!("Urgent".parse::<Priority>().unwrap(), Priority::Urgent);
        assert!("stat".parse::<Priority>().is_err());
    }

    #[test]
    fn test_sample_json_round_trip_validates() {
        let value = json!({
            "id": "sample-3-7",
            "sample_number": "S20240313-007",
            "submitted_at": "2024-03-13T14:00:00Z",
            "completed_at": "2024-03-13T15:10:00Z",
            "priority": "urgent",
            "status": "completed",
            "sample_type": "Toxicology",
            "location_id": "loc-004",
            "processing_minutes": 70,
            "technician": "David Kim",
            "department": "Emergency"
        });

        let sample: Sample = serde_json::from_value(value).unwrap();
        assert_eq!(sample.processing_minutes(), Some(70));

        let serialized = serde_json::to_value(&sample).unwrap();
        assert_eq!(serialized["status"], "completed");
        let again: Sample = serde_json::from_value(serialized).unwrap();
        assert_eq!(again, sample);
    }

    #[test]
    fn test_sample_json_rejects_inconsistent_record() {
        let value = json!({
            "id": "sample-3-8",
            "sample_number": "S20240313-008",
            "submitted_at": "2024-03-13T14:00:00Z",
            "priority": "low",
            "status": "completed",
            "sample_type": "Serology",
            "location_id": "loc-001",
            "technician": "Tom Wilson",
            "department": "Clinical Chemistry"
        });

        let result: Result<Sample, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }
}
