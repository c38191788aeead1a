//! Clinics
//!
//! A clinic belongs to exactly one location for its whole life and acts as
//! the notification subject for patient enrollment.

use super::errors::{NotifyError, PolyclinicError};
use super::ids::{ClinicId, LocationId};
use super::user::Patient;
use crate::notification::{ClinicEvent, FanOut, FanOutReport, Observer, Subject};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Clinic variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClinicKind {
    State,
    Private,
}

impl ClinicKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClinicKind::State => "state",
            ClinicKind::Private => "private",
        }
    }
}

impl fmt::Display for ClinicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClinicKind {
    type Err = PolyclinicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "state" => Ok(ClinicKind::State),
            "private" => Ok(ClinicKind::Private),
            other => Err(PolyclinicError::UnknownKind(format!(
                "clinic kind '{other}'"
            ))),
        }
    }
}

/// A clinic
///
/// `patients` holds patient names, the key the handler layer looks patients
/// up by. Observers are not serialized.
#[derive(Debug, Serialize)]
pub struct Clinic {
    id: ClinicId,
    kind: ClinicKind,
    pub name: String,
    location: LocationId,
    patients: Vec<String>,
    #[serde(skip)]
    observers: Subject,
}

impl Clinic {
    /// Builds a clinic without touching its location
    ///
    /// Callers that keep the location must follow up with
    /// [`Location::attach`](super::location::Location::attach).
    pub fn new(
        id: ClinicId,
        kind: ClinicKind,
        name: impl Into<String>,
        location: LocationId,
    ) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            location,
            patients: Vec::new(),
            observers: Subject::default(),
        }
    }

    pub fn id(&self) -> ClinicId {
        self.id
    }

    pub fn kind(&self) -> ClinicKind {
        self.kind
    }

    /// The location this clinic was built for
    pub fn location(&self) -> LocationId {
        self.location
    }

    /// Names of enrolled patients, in enrollment order
    pub fn patients(&self) -> &[String] {
        &self.patients
    }

    pub fn observers(&self) -> &Subject {
        &self.observers
    }

    /// Registers an observer for enrollment events
    pub fn attach_observer(&mut self, observer: Arc<dyn Observer>) {
        self.observers.attach(observer);
    }

    /// Sets how observer failures affect the rest of the fan-out
    pub fn set_fan_out(&mut self, policy: FanOut) {
        self.observers.set_policy(policy);
    }

    /// Enrolls `patient` and notifies every observer
    ///
    /// Both membership appends happen before any observer runs, so they
    /// stay in place even when the fan-out fails. No dedup: enrolling the
    /// same patient twice appends and notifies twice.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::Aborted` when the subject uses
    /// [`FanOut::Abort`] and an observer fails.
    pub fn add_patient(&mut self, patient: &mut Patient) -> Result<FanOutReport, NotifyError> {
        self.patients.push(patient.name.clone());
        patient.join(self.id);

        let event = ClinicEvent::PatientAdded {
            clinic: self.name.clone(),
            patient: patient.name.clone(),
        };
        self.observers.notify(&event)
    }

    /// Prototype copy under a new id and name
    ///
    /// Copies kind, enrolled patients and observers. The location is shared,
    /// not copied, and the copy is not attached to the location's clinics.
    pub fn prototype(&self, id: ClinicId, name: impl Into<String>) -> Clinic {
        Clinic {
            id,
            kind: self.kind,
            name: name.into(),
            location: self.location,
            patients: self.patients.clone(),
            observers: self.observers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::tests_support::RecordingObserver;

    fn clinic() -> Clinic {
        Clinic::new(ClinicId::new(1), ClinicKind::State, "City Clinic", LocationId::new(0))
    }

    #[test]
    fn test_clinic_kind_parse() {
        assert_eq!(ClinicKind::from_str("state").unwrap(), ClinicKind::State);
        assert_eq!(ClinicKind::from_str("private").unwrap(), ClinicKind::Private);
        assert!(matches!(
            ClinicKind::from_str("military"),
            Err(PolyclinicError::UnknownKind(_))
        ));
    }

    #[test]
    fn test_add_patient_twice_appends_and_notifies_twice() {
        let observer = Arc::new(RecordingObserver::new("recorder"));
        let mut clinic = clinic();
        clinic.attach_observer(observer.clone());
        let mut patient = Patient::new("Anna");

        clinic.add_patient(&mut patient).unwrap();
        clinic.add_patient(&mut patient).unwrap();

        assert_eq!(clinic.patients(), &["Anna".to_string(), "Anna".to_string()]);
        assert_eq!(patient.clinics(), &[clinic.id(), clinic.id()]);
        assert_eq!(observer.events().len(), 2);
    }

    #[test]
    fn test_prototype_shares_location_and_rebinds_name() {
        let mut original = clinic();
        original.attach_observer(Arc::new(RecordingObserver::new("recorder")));
        let mut patient = Patient::new("Anna");
        original.add_patient(&mut patient).unwrap();

        let mut copy = original.prototype(ClinicId::new(2), "copy_City Clinic");
        assert_eq!(copy.name, "copy_City Clinic");
        assert_eq!(copy.id(), ClinicId::new(2));
        assert_eq!(copy.location(), original.location());
        assert_eq!(copy.patients(), original.patients());
        assert_eq!(copy.observers().count(), 1);

        let mut other = Patient::new("Boris");
        copy.add_patient(&mut other).unwrap();
        assert_eq!(original.patients().len(), 1);
        assert_eq!(copy.patients().len(), 2);
    }

    #[test]
    fn test_serialize_skips_observers() {
        let mut clinic = clinic();
        clinic.attach_observer(Arc::new(RecordingObserver::new("recorder")));
        let json = serde_json::to_value(&clinic).unwrap();
        assert_eq!(json["name"], "City Clinic");
        assert_eq!(json["kind"], "state");
        assert!(json.get("observers").is_none());
    }
}
