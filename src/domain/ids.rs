//! Domain identifier types
//!
//! Newtype wrappers for the identifiers the registry issues. Each type keeps
//! location ids and clinic ids from being mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Location identifier
///
/// Issued by the registry's id allocator, unique for the process lifetime.
///
/// # Examples
///
/// ```
/// use polyclinic::domain::ids::LocationId;
/// use std::str::FromStr;
///
/// let id = LocationId::from_str("4").unwrap();
/// assert_eq!(id.value(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(u64);

impl LocationId {
    /// Wraps a raw id
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LocationId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| format!("Invalid location id '{s}': {e}"))
    }
}

/// Clinic identifier
///
/// Issued by the registry when a clinic is constructed. Location and patient
/// back-references point at clinics through this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClinicId(u64);

impl ClinicId {
    /// Wraps a raw id
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClinicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
