//! Handler contract

use super::request::{Request, Response, Status};
use crate::core::site::Site;
use crate::domain::Result;
use async_trait::async_trait;

/// Body of the not-found page
pub const NOT_FOUND_BODY: &str = "404 PAGE Not Found";

/// A page controller
///
/// Handlers read and write the site's registry and may fail with any crate
/// error; the dispatcher turns failures into responses.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, site: &Site, request: &Request) -> Result<Response>;
}

/// Fallback for unregistered paths
#[derive(Debug, Default, Clone, Copy)]
pub struct NotFoundHandler;

#[async_trait]
impl Handler for NotFoundHandler {
    async fn handle(&self, _site: &Site, request: &Request) -> Result<Response> {
        tracing::debug!(path = %request.path, "No route registered");
        Ok(Response::new(Status::NotFound, NOT_FOUND_BODY))
    }
}
