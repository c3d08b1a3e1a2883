//! Result type alias for LabLens
//!
//! This module provides a convenient Result type alias that uses LabError
//! as the error type.

use super::errors::LabError;

/// Result type alias for LabLens operations
///
/// # Examples
///
/// ```
/// use lablens::domain::result::Result;
/// use lablens::domain::errors::LabError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(LabError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, LabError>;
