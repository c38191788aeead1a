//! Patient pages

use super::decoded_field;
use super::generic::{CreateView, ListView};
use crate::core::site::Site;
use crate::domain::{PolyclinicError, Result};
use crate::routing::Request;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// `/patients-list/`
pub struct PatientsList;

#[async_trait]
impl ListView for PatientsList {
    fn template_name(&self) -> &str {
        "patients_list.html"
    }

    async fn queryset(&self, site: &Site) -> Result<Value> {
        Ok(serde_json::to_value(site.engine().await.patients())?)
    }
}

/// `/create-patient/`
///
/// POST decodes `name`, writes the patient through the mapper when a store
/// is configured, then registers it with its row id.
pub struct CreatePatient;

#[async_trait]
impl CreateView for CreatePatient {
    fn template_name(&self) -> &str {
        "create_patient.html"
    }

    async fn create(&self, site: &Site, request: &Request) -> Result<()> {
        let name = decoded_field(request, "name")?;
        let mut engine = site.engine().await;
        let mut patient = engine
            .create_user("patient", &name)?
            .into_patient()
            .ok_or_else(|| PolyclinicError::UnknownKind("patient".to_string()))?;

        if let Some(mappers) = site.mappers() {
            let id = mappers.for_kind("patient")?.insert(&mut patient).await?;
            tracing::info!(id, name = %name, "Patient stored");
        }
        engine.add_patient(patient);
        Ok(())
    }
}

/// `/add-patient/`
///
/// POST enrolls `patient_name` in `clinic_name`. The form context lists
/// every clinic and patient.
pub struct AddPatient;

#[async_trait]
impl CreateView for AddPatient {
    fn template_name(&self) -> &str {
        "add_patient.html"
    }

    async fn context(&self, site: &Site) -> Result<Map<String, Value>> {
        let engine = site.engine().await;
        let mut context = Map::new();
        context.insert("clinics".to_string(), serde_json::to_value(engine.clinics())?);
        context.insert("patients".to_string(), serde_json::to_value(engine.patients())?);
        Ok(context)
    }

    async fn create(&self, site: &Site, request: &Request) -> Result<()> {
        let clinic_name = decoded_field(request, "clinic_name")?;
        let patient_name = decoded_field(request, "patient_name")?;

        let report = site.engine().await.enroll(&clinic_name, &patient_name)?;
        for failure in &report.failures {
            tracing::warn!(
                observer = %failure.observer,
                reason = %failure.reason,
                "Notification not delivered"
            );
        }
        Ok(())
    }
}
