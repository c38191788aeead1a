//! Domain models and types for Polyclinic.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Identifiers** ([`LocationId`], [`ClinicId`])
//! - **Entities** ([`User`], [`Doctor`], [`Patient`], [`Location`], [`Clinic`])
//! - **Error types** ([`PolyclinicError`], [`PersistenceError`], [`NotifyError`])
//! - **Result type alias** ([`Result`])
//!
//! # Relations
//!
//! Entities refer to each other by id rather than by pointer. A location
//! names its parent and lists the clinics attached to it; a clinic names its
//! location and lists its patients; a patient lists the clinics it joined.
//! The registry ([`crate::core::registry::Engine`]) owns all of them.
//!
//! ```rust
//! use polyclinic::domain::{Clinic, ClinicKind, Location};
//! use polyclinic::domain::ids::{ClinicId, LocationId};
//!
//! let mut district = Location::new(LocationId::new(0), "Central", None);
//! let clinic = Clinic::new(ClinicId::new(0), ClinicKind::Private, "Dental", district.id());
//! district.attach(&clinic);
//!
//! assert_eq!(district.clinics(), &[clinic.id()]);
//! ```

pub mod clinic;
pub mod errors;
pub mod ids;
pub mod location;
pub mod result;
pub mod user;

// Re-export commonly used types for convenience
pub use clinic::{Clinic, ClinicKind};
pub use errors::{NotifyError, PersistenceError, PolyclinicError};
pub use ids::{ClinicId, LocationId};
pub use location::Location;
pub use result::Result;
pub use user::{Doctor, Patient, User, UserKind};
