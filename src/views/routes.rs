//! Route table of the site

use super::api::ClinicsApi;
use super::clinics::{ClinicsList, CopyClinic, CreateClinic};
use super::generic::{CreatePage, ListPage};
use super::locations::{CreateLocation, LocationsList};
use super::pages::{About, Index, VisitPrograms};
use super::patients::{AddPatient, CreatePatient, PatientsList};
use crate::routing::Dispatcher;
use std::sync::Arc;

/// Registers every page, each wrapped in a timing decorator
pub fn register_routes(dispatcher: &mut Dispatcher) {
    dispatcher.register_debug("/", "Index", Arc::new(Index));
    dispatcher.register_debug("/about/", "About", Arc::new(About));
    dispatcher.register_debug("/visit-programs/", "VisitPrograms", Arc::new(VisitPrograms));
    dispatcher.register_debug("/create-location/", "CreateLocation", Arc::new(CreateLocation));
    dispatcher.register_debug("/create-clinic/", "CreateClinic", Arc::new(CreateClinic::new()));
    dispatcher.register_debug("/clinics-list/", "ClinicsList", Arc::new(ClinicsList));
    dispatcher.register_debug("/locations-list/", "LocationsList", Arc::new(LocationsList));
    dispatcher.register_debug("/copy-clinic/", "CopyClinic", Arc::new(CopyClinic));
    dispatcher.register_debug("/patients-list/", "PatientsList", Arc::new(ListPage(PatientsList)));
    dispatcher.register_debug(
        "/create-patient/",
        "CreatePatient",
        Arc::new(CreatePage(CreatePatient)),
    );
    dispatcher.register_debug("/add-patient/", "AddPatient", Arc::new(CreatePage(AddPatient)));
    dispatcher.register_debug("/api/", "ClinicsApi", Arc::new(ClinicsApi));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_pages_registered() {
        let mut dispatcher = Dispatcher::new();
        register_routes(&mut dispatcher);
        assert_eq!(
            dispatcher.paths(),
            vec![
                "/",
                "/about/",
                "/add-patient/",
                "/api/",
                "/clinics-list/",
                "/copy-clinic/",
                "/create-clinic/",
                "/create-location/",
                "/create-patient/",
                "/locations-list/",
                "/patients-list/",
                "/visit-programs/",
            ]
        );
    }
}
