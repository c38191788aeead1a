//! Timing decorator for handlers

use super::handler::Handler;
use super::request::{Request, Response};
use crate::core::site::Site;
use crate::domain::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

/// Wraps a handler and logs entry, exit and elapsed time under `name`
///
/// The inner handler's response or error is returned unchanged.
pub struct DebugHandler {
    name: String,
    inner: Arc<dyn Handler>,
}

impl DebugHandler {
    pub fn new(name: impl Into<String>, inner: Arc<dyn Handler>) -> Self {
        Self {
            name: name.into(),
            inner,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl Handler for DebugHandler {
    async fn handle(&self, site: &Site, request: &Request) -> Result<Response> {
        tracing::debug!(handler = %self.name, method = %request.method, path = %request.path, "Handler entered");
        let start = Instant::now();

        let result = self.inner.handle(site, request).await;

        let elapsed = start.elapsed();
        match &result {
            Ok(response) => tracing::info!(
                handler = %self.name,
                status = response.status.code(),
                elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                "Handler finished"
            ),
            Err(e) => tracing::info!(
                handler = %self.name,
                error = %e,
                elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                "Handler failed"
            ),
        }
        result
    }
}
