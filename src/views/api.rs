//! JSON API

use crate::core::site::Site;
use crate::domain::Result;
use crate::routing::{Handler, Request, Response};
use async_trait::async_trait;

/// `/api/`: every registered clinic as a JSON array
pub struct ClinicsApi;

#[async_trait]
impl Handler for ClinicsApi {
    async fn handle(&self, site: &Site, _request: &Request) -> Result<Response> {
        let body = serde_json::to_string(site.engine().await.clinics())?;
        Ok(Response::ok(body))
    }
}
