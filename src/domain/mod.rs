//! Domain models and types for LabLens.
//!
//! This module contains the core domain models, types, and business rules.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`SampleId`], [`LocationId`])
//! - **Domain models** ([`Sample`], [`Location`])
//! - **Windows** ([`DateWindow`], [`InstantWindow`])
//! - **Reference catalogs** ([`catalog::SAMPLE_TYPES`], [`catalog::default_locations`])
//! - **Error types** ([`LabError`]) and the [`Result`] alias
//!
//! Samples and locations are immutable facts supplied by a data source.
//! Every invariant is checked once, at construction, so the metrics engine
//! can treat its inputs as trusted.
//!
//! # Builder Pattern
//!
//! ```rust
//! use lablens::domain::{Priority, Sample, SampleStatus};
//! use chrono::Utc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let sample = Sample::builder()
//!     .id("sample-0-1")
//!     .sample_number("S20240310-001")
//!     .submitted_at(Utc::now())
//!     .priority(Priority::Urgent)
//!     .status(SampleStatus::Received)
//!     .sample_type("Serology")
//!     .location_id("loc-004")
//!     .technician("Lisa Thompson")
//!     .department("Emergency")
//!     .build()?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod errors;
pub mod ids;
pub mod location;
pub mod result;
pub mod sample;
pub mod window;

// Re-export commonly used types for convenience
pub use errors::LabError;
pub use ids::{LocationId, SampleId};
pub use location::Location;
pub use result::Result;
pub use sample::{Priority, Sample, SampleBuilder, SampleStatus};
pub use window::{DateWindow, InstantWindow};
