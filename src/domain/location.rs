//! Laboratory location domain model

use super::errors::LabError;
use super::ids::LocationId;
use serde::{Deserialize, Serialize};

/// A laboratory facility that processes samples
///
/// `capacity` is the number of samples the location can process in the
/// metrics window. It is only used as the utilization denominator.
///
/// # Examples
///
/// ```
/// use lablens::domain::location::Location;
/// use lablens::domain::ids::LocationId;
///
/// let location = Location::new(
///     LocationId::new("loc-001").unwrap(),
///     "Main Laboratory",
///     "MAIN",
///     "Clinical Chemistry",
///     500,
///     true,
/// )
/// .unwrap();
/// assert!(location.is_active);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LocationRecord")]
pub struct Location {
    /// Location identifier
    pub id: LocationId,

    /// Display name
    pub name: String,

    /// Short code (e.g. "MAIN")
    pub code: String,

    /// Owning department
    pub department: String,

    /// Maximum samples processed in the metrics window
    pub capacity: u32,

    /// Inactive locations are excluded from breakdowns
    pub is_active: bool,
}

impl Location {
    /// Creates a new location
    ///
    /// # Errors
    ///
    /// Returns `LabError::Validation` if the name is blank or capacity is zero
    pub fn new(
        id: LocationId,
        name: impl Into<String>,
        code: impl Into<String>,
        department: impl Into<String>,
        capacity: u32,
        is_active: bool,
    ) -> Result<Self, LabError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LabError::Validation(format!(
                "Location {id} must have a name"
            )));
        }
        if capacity == 0 {
            return Err(LabError::Validation(format!(
                "Location {id} must have a positive capacity"
            )));
        }

        Ok(Self {
            id,
            name,
            code: code.into(),
            department: department.into(),
            capacity,
            is_active,
        })
    }
}

/// Wire shape of a location, validated into [`Location`] on deserialization
#[derive(Debug, Deserialize)]
struct LocationRecord {
    id: LocationId,
    name: String,
    code: String,
    department: String,
    capacity: u32,
    #[serde(default = "default_active")]
    is_active: bool,
}

fn default_active() -> bool {
    true
}

impl TryFrom<LocationRecord> for Location {
    type Error = LabError;

    fn try_from(record: LocationRecord) -> Result<Self, Self::Error> {
        Location::new(
            record.id,
            record.name,
            record.code,
            record.department,
            record.capacity,
            record.is_active,
        )
    }
}
