//! Observer capability

use crate::domain::errors::NotifyError;
use serde::Serialize;
use std::fmt;

/// Events a clinic publishes to its observers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ClinicEvent {
    /// A patient was enrolled in a clinic
    PatientAdded { clinic: String, patient: String },
}

impl fmt::Display for ClinicEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClinicEvent::PatientAdded { clinic, patient } => {
                write!(f, "{patient} joined {clinic}")
            }
        }
    }
}

/// A sink for clinic events
///
/// The subject knows nothing about how an observer delivers the event.
pub trait Observer: Send + Sync {
    /// Short name used in logs and failure reports
    fn name(&self) -> &str;

    /// Handles one event
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::Delivery` when the event could not be delivered.
    fn notify(&self, event: &ClinicEvent) -> Result<(), NotifyError>;
}
