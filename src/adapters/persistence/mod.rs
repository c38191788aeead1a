//! Data mappers
//!
//! - [`PatientMapper`] - CRUD for patients over the shared connection
//! - [`MapperRegistry`] - picks the mapper for an entity or kind name

pub mod patient;
pub mod registry;

pub use patient::{PatientMapper, PATIENT_TABLE};
pub use registry::MapperRegistry;
