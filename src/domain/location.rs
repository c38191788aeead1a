//! Locations (city districts)
//!
//! Locations nest through an optional parent id. The parent link is weak:
//! it names another location but does not keep it alive or registered.

use super::clinic::Clinic;
use super::ids::{ClinicId, LocationId};
use serde::{Deserialize, Serialize};

/// A district that clinics are attached to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    id: LocationId,
    pub name: String,
    parent: Option<LocationId>,
    clinics: Vec<ClinicId>,
}

impl Location {
    /// Creates a location with an id issued by the registry's allocator
    pub fn new(id: LocationId, name: impl Into<String>, parent: Option<LocationId>) -> Self {
        Self {
            id,
            name: name.into(),
            parent,
            clinics: Vec::new(),
        }
    }

    pub fn id(&self) -> LocationId {
        self.id
    }

    pub fn parent(&self) -> Option<LocationId> {
        self.parent
    }

    /// Clinics attached directly to this location, in attach order
    pub fn clinics(&self) -> &[ClinicId] {
        &self.clinics
    }

    /// Records `clinic` as belonging to this location
    ///
    /// Second step of clinic construction. The clinic must already be fully
    /// built and must name this location.
    pub fn attach(&mut self, clinic: &Clinic) {
        debug_assert_eq!(clinic.location(), self.id);
        self.clinics.push(clinic.id());
    }

    /// Counts clinics here and along the parent chain
    ///
    /// Parents are resolved in `locations`; a parent id that is not found
    /// ends the chain. The chain must be acyclic.
    pub fn clinics_count(&self, locations: &[Location]) -> usize {
        let mut total = self.clinics.len();
        let mut next = self.parent;
        while let Some(parent_id) = next {
            match locations.iter().find(|l| l.id == parent_id) {
                Some(parent) => {
                    total += parent.clinics.len();
                    next = parent.parent;
                }
                None => break,
            }
        }
        total
    }
}
