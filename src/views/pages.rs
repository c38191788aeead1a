//! Static pages and the index

use super::objects_list;
use crate::core::site::Site;
use crate::domain::Result;
use crate::routing::{Handler, Request, Response, DATE_KEY};
use async_trait::async_trait;
use serde_json::json;

/// `/`: every registered location
pub struct Index;

#[async_trait]
impl Handler for Index {
    async fn handle(&self, site: &Site, _request: &Request) -> Result<Response> {
        let context = objects_list(site.engine().await.locations())?;
        Ok(Response::ok(site.render("index.html", &context)?))
    }
}

/// `/about/`
pub struct About;

#[async_trait]
impl Handler for About {
    async fn handle(&self, site: &Site, _request: &Request) -> Result<Response> {
        Ok(Response::ok(site.render("about.html", &json!({}))?))
    }
}

/// `/visit-programs/`: the date stamped on the request by the date front
pub struct VisitPrograms;

#[async_trait]
impl Handler for VisitPrograms {
    async fn handle(&self, site: &Site, request: &Request) -> Result<Response> {
        let context = json!({ "data": request.extra(DATE_KEY) });
        Ok(Response::ok(site.render("visit_programs.html", &context)?))
    }
}
