//! Data context for the metrics engine
//!
//! - [`store`] - the validated, read-only [`SampleStore`]
//! - [`generator`] - the seeded [`MockDataGenerator`]
//!
//! The store is constructed explicitly (from a JSON file or the generator)
//! and passed to the engine by reference. There is no global dataset.

pub mod generator;
pub mod store;

pub use generator::MockDataGenerator;
pub use store::{Dataset, SampleStore};
