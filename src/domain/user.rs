//! User entities
//!
//! Users come in two kinds. Doctors are plain named records; patients also
//! keep a membership record of the clinics they were added to.

use super::errors::PolyclinicError;
use super::ids::ClinicId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Registered user kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserKind {
    Doctor,
    Patient,
}

impl UserKind {
    /// Discriminator used by factories and forms
    pub fn as_str(&self) -> &'static str {
        match self {
            UserKind::Doctor => "doctor",
            UserKind::Patient => "patient",
        }
    }
}

impl fmt::Display for UserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserKind {
    type Err = PolyclinicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "doctor" => Ok(UserKind::Doctor),
            "patient" => Ok(UserKind::Patient),
            other => Err(PolyclinicError::UnknownKind(format!("user kind '{other}'"))),
        }
    }
}

/// A doctor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub name: String,
    #[serde(default)]
    pub id: Option<i64>,
}

impl Doctor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
        }
    }
}

/// A patient
///
/// `id` is the row id assigned by the persistence layer and stays `None`
/// until the patient has been inserted. `clinics` records membership only;
/// the clinics themselves live in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub name: String,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    clinics: Vec<ClinicId>,
}

impl Patient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            clinics: Vec::new(),
        }
    }

    /// Rebuilds a patient from a stored row
    pub fn persisted(id: i64, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: Some(id),
            clinics: Vec::new(),
        }
    }

    /// Clinics this patient was added to, in order (repeats kept)
    pub fn clinics(&self) -> &[ClinicId] {
        &self.clinics
    }

    pub(crate) fn join(&mut self, clinic: ClinicId) {
        self.clinics.push(clinic);
    }
}

/// A user of either kind, as produced by the user factory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum User {
    Doctor(Doctor),
    Patient(Patient),
}

impl User {
    /// Builds a user of the given kind
    pub fn new(kind: UserKind, name: impl Into<String>) -> Self {
        match kind {
            UserKind::Doctor => User::Doctor(Doctor::new(name)),
            UserKind::Patient => User::Patient(Patient::new(name)),
        }
    }

    pub fn kind(&self) -> UserKind {
        match self {
            User::Doctor(_) => UserKind::Doctor,
            User::Patient(_) => UserKind::Patient,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            User::Doctor(d) => &d.name,
            User::Patient(p) => &p.name,
        }
    }

    pub fn id(&self) -> Option<i64> {
        match self {
            User::Doctor(d) => d.id,
            User::Patient(p) => p.id,
        }
    }

    /// Returns the patient, if this user is one
    pub fn into_patient(self) -> Option<Patient> {
        match self {
            User::Patient(p) => Some(p),
            User::Doctor(_) => None,
        }
    }

    /// Returns the doctor, if this user is one
    pub fn into_doctor(self) -> Option<Doctor> {
        match self {
            User::Doctor(d) => Some(d),
            User::Patient(_) => None,
        }
    }
}
