//! Result type alias for Polyclinic

use super::errors::PolyclinicError;

/// Result type alias for Polyclinic operations
///
/// # Examples
///
/// ```
/// use polyclinic::domain::result::Result;
/// use polyclinic::domain::errors::PolyclinicError;
///
/// fn lookup(found: bool) -> Result<&'static str> {
///     if found {
///         Ok("Central")
///     } else {
///         Err(PolyclinicError::NotFound("location id=3".to_string()))
///     }
/// }
/// ```
pub type Result<T> = std::result::Result<T, PolyclinicError>;
