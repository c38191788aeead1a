//! The in-memory registry
//!
//! [`Engine`] owns the four entity collections and the factories that build
//! entities for them. Factories never append: the caller decides what gets
//! registered. Collections only grow.

use super::allocator::{IdAllocator, SequentialIds};
use super::decode;
use crate::domain::{
    Clinic, ClinicId, ClinicKind, Doctor, Location, LocationId, Patient, PolyclinicError,
    Result, User, UserKind,
};
use crate::notification::{FanOut, FanOutReport};
use std::str::FromStr;

/// Registry and factory hub for domain entities
pub struct Engine {
    doctors: Vec<Doctor>,
    patients: Vec<Patient>,
    clinics: Vec<Clinic>,
    locations: Vec<Location>,
    location_ids: Box<dyn IdAllocator>,
    clinic_ids: SequentialIds,
    fan_out: FanOut,
}

impl Engine {
    /// Empty registry with location ids starting at 0
    pub fn new() -> Self {
        Self::with_allocator(Box::new(SequentialIds::default()))
    }

    /// Empty registry drawing location ids from `location_ids`
    pub fn with_allocator(location_ids: Box<dyn IdAllocator>) -> Self {
        Self {
            doctors: Vec::new(),
            patients: Vec::new(),
            clinics: Vec::new(),
            locations: Vec::new(),
            location_ids,
            clinic_ids: SequentialIds::default(),
            fan_out: FanOut::default(),
        }
    }

    /// Sets the fan-out policy given to every clinic built afterwards
    pub fn with_fan_out(mut self, policy: FanOut) -> Self {
        self.fan_out = policy;
        self
    }

    // --- factories -------------------------------------------------------

    /// Builds a user of kind `"doctor"` or `"patient"`
    ///
    /// # Errors
    ///
    /// Returns `PolyclinicError::UnknownKind` for any other kind.
    pub fn create_user(&self, kind: &str, name: &str) -> Result<User> {
        let kind = UserKind::from_str(kind)?;
        Ok(User::new(kind, name))
    }

    /// Builds a location with the next allocator id
    ///
    /// The parent is referenced by id only. The new location is not
    /// registered and the parent is left untouched.
    pub fn create_location(&mut self, name: &str, parent: Option<LocationId>) -> Location {
        let id = LocationId::new(self.location_ids.next());
        tracing::debug!(location_id = %id, name, parent = ?parent, "Created location");
        Location::new(id, name, parent)
    }

    /// Builds a clinic of kind `"state"` or `"private"` and attaches it to
    /// `location`
    ///
    /// This mutates the registered location: once the clinic is fully
    /// built, its id is appended to the location's clinics. The clinic
    /// itself is returned unregistered.
    ///
    /// # Errors
    ///
    /// - `PolyclinicError::UnknownKind` for an unknown clinic kind
    /// - `PolyclinicError::NotFound` if `location` is not registered
    pub fn create_clinic(&mut self, kind: &str, name: &str, location: LocationId) -> Result<Clinic> {
        let kind = ClinicKind::from_str(kind)?;
        // Fail before drawing an id
        self.find_location_by_id(location)?;

        let mut clinic = Clinic::new(ClinicId::new(self.clinic_ids.next()), kind, name, location);
        clinic.set_fan_out(self.fan_out);

        self.find_location_mut(location)?.attach(&clinic);
        tracing::debug!(
            clinic_id = %clinic.id(),
            kind = %kind,
            name,
            location_id = %location,
            "Created clinic"
        );
        Ok(clinic)
    }

    /// Prototype copy of the first clinic named `source`
    ///
    /// The copy gets a fresh id and `new_name`, shares the source's
    /// location, and is not attached to that location. Returns `None` when
    /// no clinic has that name.
    pub fn clone_clinic(&mut self, source: &str, new_name: &str) -> Option<Clinic> {
        let index = self.clinics.iter().position(|c| c.name == source)?;
        let id = ClinicId::new(self.clinic_ids.next());
        Some(self.clinics[index].prototype(id, new_name))
    }

    /// Decodes a percent/plus-escaped form value
    ///
    /// # Errors
    ///
    /// Returns `PolyclinicError::Decode` on malformed input.
    pub fn decode_value(raw: &str) -> Result<String> {
        decode::decode_value(raw)
    }

    // --- registration ----------------------------------------------------

    pub fn add_doctor(&mut self, doctor: Doctor) {
        self.doctors.push(doctor);
    }

    pub fn add_patient(&mut self, patient: Patient) {
        self.patients.push(patient);
    }

    pub fn add_clinic(&mut self, clinic: Clinic) {
        self.clinics.push(clinic);
    }

    pub fn add_location(&mut self, location: Location) {
        self.locations.push(location);
    }

    /// Registers a user in the collection matching its kind
    pub fn add_user(&mut self, user: User) {
        match user {
            User::Doctor(d) => self.add_doctor(d),
            User::Patient(p) => self.add_patient(p),
        }
    }

    // --- lookup ----------------------------------------------------------

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn clinics(&self) -> &[Clinic] {
        &self.clinics
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Registered location with `id`
    ///
    /// # Errors
    ///
    /// Returns `PolyclinicError::NotFound` if no registered location has
    /// that id.
    pub fn find_location_by_id(&self, id: LocationId) -> Result<&Location> {
        self.locations
            .iter()
            .find(|l| l.id() == id)
            .ok_or_else(|| location_not_found(id))
    }

    fn find_location_mut(&mut self, id: LocationId) -> Result<&mut Location> {
        self.locations
            .iter_mut()
            .find(|l| l.id() == id)
            .ok_or_else(|| location_not_found(id))
    }

    /// First registered clinic named `name`
    pub fn get_clinic(&self, name: &str) -> Option<&Clinic> {
        self.clinics.iter().find(|c| c.name == name)
    }

    /// Mutable access to the first registered clinic named `name`
    pub fn get_clinic_mut(&mut self, name: &str) -> Option<&mut Clinic> {
        self.clinics.iter_mut().find(|c| c.name == name)
    }

    /// Registered clinic with `id`
    pub fn clinic(&self, id: ClinicId) -> Option<&Clinic> {
        self.clinics.iter().find(|c| c.id() == id)
    }

    /// First registered patient named `name`
    pub fn get_patient(&self, name: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.name == name)
    }

    /// Registered clinics attached to location `id`, in attach order
    ///
    /// Attached clinics that were never registered are skipped.
    ///
    /// # Errors
    ///
    /// Returns `PolyclinicError::NotFound` for an unknown location.
    pub fn clinics_at(&self, id: LocationId) -> Result<Vec<&Clinic>> {
        let location = self.find_location_by_id(id)?;
        Ok(location
            .clinics()
            .iter()
            .filter_map(|clinic_id| self.clinic(*clinic_id))
            .collect())
    }

    /// Clinic count of location `id` including its parent chain
    ///
    /// # Errors
    ///
    /// Returns `PolyclinicError::NotFound` for an unknown location.
    pub fn clinics_count(&self, id: LocationId) -> Result<usize> {
        Ok(self.find_location_by_id(id)?.clinics_count(&self.locations))
    }

    // --- mutation --------------------------------------------------------

    /// Enrolls the patient named `patient` in the clinic named `clinic`
    ///
    /// # Errors
    ///
    /// - `PolyclinicError::NotFound` if either name is not registered
    /// - `PolyclinicError::Notification` if the clinic aborts its fan-out
    pub fn enroll(&mut self, clinic: &str, patient: &str) -> Result<FanOutReport> {
        let clinic_index = self
            .clinics
            .iter()
            .position(|c| c.name == clinic)
            .ok_or_else(|| PolyclinicError::NotFound(format!("clinic named '{clinic}'")))?;
        let patient_index = self
            .patients
            .iter()
            .position(|p| p.name == patient)
            .ok_or_else(|| PolyclinicError::NotFound(format!("patient named '{patient}'")))?;

        let report = self.clinics[clinic_index].add_patient(&mut self.patients[patient_index])?;
        tracing::info!(
            clinic,
            patient,
            delivered = report.delivered,
            failed = report.failures.len(),
            "Patient enrolled"
        );
        Ok(report)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

fn location_not_found(id: LocationId) -> PolyclinicError {
    PolyclinicError::NotFound(format!("location with id = {id}"))
}
