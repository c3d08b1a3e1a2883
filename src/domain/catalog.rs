//! Reference catalogs for sample types and laboratory locations

use super::ids::LocationId;
use super::location::Location;

/// Known sample type catalog, in display order
pub const SAMPLE_TYPES: [&str; 10] = [
    "Blood Chemistry",
    "Complete Blood Count",
    "Urinalysis",
    "Microbiology Culture",
    "Immunology",
    "Molecular Diagnostics",
    "Cytology",
    "Histology",
    "Toxicology",
    "Serology",
];

/// Returns the sample type catalog as owned strings
pub fn sample_types() -> Vec<String> {
    SAMPLE_TYPES.iter().map(|t| t.to_string()).collect()
}

/// Returns the default set of laboratory locations
///
/// The last entry is inactive and only ever appears as a historical
/// reference on older samples.
pub fn default_locations() -> Vec<Location> {
    [
        ("loc-001", "Main Laboratory", "MAIN", "Clinical Chemistry", 500, true),
        ("loc-002", "Microbiology Lab", "MICRO", "Microbiology", 200, true),
        ("loc-003", "Hematology Lab", "HEMA", "Hematology", 300, true),
        ("loc-004", "Emergency Lab", "EMRG", "Emergency", 100, true),
        ("loc-005", "Research Lab A", "RESA", "Research", 150, false),
    ]
    .into_iter()
    .map(|(id, name, code, department, capacity, is_active)| Location {
        id: LocationId(id.to_string()),
        name: name.to_string(),
        code: code.to_string(),
        department: department.to_string(),
        capacity,
        is_active,
    })
    .collect()
}
