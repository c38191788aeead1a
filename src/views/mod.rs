//! Page controllers
//!
//! Every page is a [`crate::routing::Handler`]. Pages read form values
//! through [`decoded_field`], which applies the registry's value decoding,
//! and render through the site's [`render::Render`] implementation.

pub mod api;
pub mod clinics;
pub mod generic;
pub mod locations;
pub mod pages;
pub mod patients;
pub mod render;
pub mod routes;

use crate::core::registry::Engine;
use crate::domain::{LocationId, PolyclinicError, Result};
use crate::routing::Request;
use serde::Serialize;
use serde_json::{json, Value};

pub use generic::{CreatePage, CreateView, ListPage, ListView, OBJECTS_LIST};
pub use render::{JsonRenderer, Render};
pub use routes::register_routes;

/// Body returned when a location id is expected but missing
pub const LOCATION_LIST_EMPTY: &str = "The location list is empty.";

/// Body returned when a clinic list cannot be chosen
pub const CLINIC_LIST_EMPTY: &str = "The clinic list is empty.";

/// `{"objects_list": items}`
pub(crate) fn objects_list<T: Serialize>(items: &[T]) -> Result<Value> {
    Ok(json!({ OBJECTS_LIST: serde_json::to_value(items)? }))
}

/// Form field `key`, decoded
///
/// # Errors
///
/// - `PolyclinicError::Validation` if the field is missing
/// - `PolyclinicError::Decode` if it is malformed
pub(crate) fn decoded_field(request: &Request, key: &str) -> Result<String> {
    let raw = request
        .field(key)
        .ok_or_else(|| PolyclinicError::Validation(format!("missing form field '{key}'")))?;
    Engine::decode_value(raw)
}

pub(crate) fn parse_location_id(raw: &str) -> Result<LocationId> {
    raw.parse::<LocationId>()
        .map_err(PolyclinicError::Validation)
}

/// Clinics attached to `id` plus the location's name and id
pub(crate) fn clinics_context(engine: &Engine, id: LocationId) -> Result<Value> {
    let location = engine.find_location_by_id(id)?;
    let clinics = engine.clinics_at(id)?;
    Ok(json!({
        OBJECTS_LIST: serde_json::to_value(clinics)?,
        "name": location.name,
        "id": location.id(),
    }))
}
