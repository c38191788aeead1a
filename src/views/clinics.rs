//! Clinic pages

use super::{
    clinics_context, decoded_field, objects_list, parse_location_id, CLINIC_LIST_EMPTY,
    LOCATION_LIST_EMPTY,
};
use crate::core::registry::Engine;
use crate::core::site::Site;
use crate::domain::{LocationId, PolyclinicError, Result};
use crate::routing::{Handler, Method, Request, Response};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Mutex;

/// `/create-clinic/`
///
/// GET `?id=` remembers the location and renders the form. POST creates a
/// state clinic at `location_id` from the form, or at the remembered
/// location, attaches the site's notifiers and registers it.
#[derive(Default)]
pub struct CreateClinic {
    last_location: Mutex<Option<LocationId>>,
}

impl CreateClinic {
    pub fn new() -> Self {
        Self::default()
    }

    fn remember(&self, id: LocationId) {
        *self.last_location.lock().unwrap_or_else(|p| p.into_inner()) = Some(id);
    }

    fn remembered(&self) -> Option<LocationId> {
        *self.last_location.lock().unwrap_or_else(|p| p.into_inner())
    }
}

#[async_trait]
impl Handler for CreateClinic {
    async fn handle(&self, site: &Site, request: &Request) -> Result<Response> {
        if request.method == Method::Get {
            let Some(raw) = request.param("id") else {
                return Ok(Response::ok(LOCATION_LIST_EMPTY));
            };
            let id = parse_location_id(raw)?;
            let engine = site.engine().await;
            let location = engine.find_location_by_id(id)?;
            self.remember(id);
            let context = json!({ "name": location.name, "id": location.id() });
            return Ok(Response::ok(site.render("create_clinic.html", &context)?));
        }

        let name = decoded_field(request, "name")?;
        let location_id = match request.field("location_id") {
            Some(raw) if !raw.trim().is_empty() => parse_location_id(raw)?,
            _ => self.remembered().ok_or_else(|| {
                PolyclinicError::Validation("no location selected for the new clinic".to_string())
            })?,
        };

        let mut engine = site.engine().await;
        let mut clinic = engine.create_clinic("state", &name, location_id)?;
        for notifier in site.notifiers() {
            clinic.attach_observer(notifier.clone());
        }
        let observers = clinic.observers().count();
        engine.add_clinic(clinic);
        tracing::info!(clinic = %name, location_id = %location_id, observers, "Clinic created");

        let context = clinics_context(&engine, location_id)?;
        Ok(Response::ok(site.render("clinics_list.html", &context)?))
    }
}

/// `/clinics-list/`: clinics of the location `?id=`
pub struct ClinicsList;

#[async_trait]
impl Handler for ClinicsList {
    async fn handle(&self, site: &Site, request: &Request) -> Result<Response> {
        site.logger().log("Clinics list requested");
        let Some(raw) = request.param("id") else {
            return Ok(Response::ok(CLINIC_LIST_EMPTY));
        };
        let id = parse_location_id(raw)?;
        let engine = site.engine().await;
        let context = clinics_context(&engine, id)?;
        Ok(Response::ok(site.render("clinics_list.html", &context)?))
    }
}

/// `/copy-clinic/`: registers `copy_<name>` as a prototype of `?name=`
pub struct CopyClinic;

impl CopyClinic {
    fn copy(engine: &mut Engine, name: &str) {
        let new_name = format!("copy_{name}");
        match engine.clone_clinic(name, &new_name) {
            Some(copy) => {
                tracing::info!(source = %name, copy = %new_name, "Clinic copied");
                engine.add_clinic(copy);
            }
            None => tracing::debug!(source = %name, "No clinic to copy"),
        }
    }
}

#[async_trait]
impl Handler for CopyClinic {
    async fn handle(&self, site: &Site, request: &Request) -> Result<Response> {
        let Some(raw) = request.param("name") else {
            return Ok(Response::ok(CLINIC_LIST_EMPTY));
        };
        let name = Engine::decode_value(raw)?;

        let mut engine = site.engine().await;
        Self::copy(&mut engine, &name);
        let context = objects_list(engine.clinics())?;
        Ok(Response::ok(site.render("clinics_list.html", &context)?))
    }
}
