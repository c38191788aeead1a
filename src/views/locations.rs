//! Location pages

use super::{decoded_field, objects_list, parse_location_id};
use crate::core::site::Site;
use crate::domain::Result;
use crate::routing::{Handler, Method, Request, Response};
use async_trait::async_trait;
use serde_json::json;

/// `/create-location/`
///
/// GET renders the form with every location as a parent choice. POST
/// creates a location from `name` and an optional `location_id` parent.
pub struct CreateLocation;

#[async_trait]
impl Handler for CreateLocation {
    async fn handle(&self, site: &Site, request: &Request) -> Result<Response> {
        let mut engine = site.engine().await;
        if request.method == Method::Get {
            let context = json!({ "locations": engine.locations() });
            return Ok(Response::ok(site.render("create_location.html", &context)?));
        }

        let name = decoded_field(request, "name")?;
        let parent = match request.field("location_id") {
            Some(raw) if !raw.trim().is_empty() => {
                let id = parse_location_id(raw)?;
                Some(engine.find_location_by_id(id)?.id())
            }
            _ => None,
        };

        let location = engine.create_location(&name, parent);
        tracing::info!(location_id = %location.id(), name = %name, "Location created");
        engine.add_location(location);

        let context = objects_list(engine.locations())?;
        Ok(Response::ok(site.render("index.html", &context)?))
    }
}

/// `/locations-list/`
pub struct LocationsList;

#[async_trait]
impl Handler for LocationsList {
    async fn handle(&self, site: &Site, _request: &Request) -> Result<Response> {
        site.logger().log("Locations list requested");
        let context = objects_list(site.engine().await.locations())?;
        Ok(Response::ok(site.render("locations_list.html", &context)?))
    }
}
