//! Path to handler dispatch

use super::debug::DebugHandler;
use super::front::Front;
use super::handler::{Handler, NotFoundHandler};
use super::request::{Request, Response, Status};
use crate::core::site::Site;
use crate::domain::PolyclinicError;
use std::collections::HashMap;
use std::sync::Arc;

/// Normalizes a route path: trimmed, with a leading and a trailing `/`
///
/// ```rust
/// use polyclinic::routing::normalize;
///
/// assert_eq!(normalize(" about "), "/about/");
/// assert_eq!(normalize("/clinics-list"), "/clinics-list/");
/// assert_eq!(normalize(""), "/");
/// ```
pub fn normalize(path: &str) -> String {
    let trimmed = path.trim();
    let mut normalized = String::with_capacity(trimmed.len() + 2);
    if !trimmed.starts_with('/') {
        normalized.push('/');
    }
    normalized.push_str(trimmed);
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    normalized
}

/// Maps a handler failure to its response
pub fn error_response(err: &PolyclinicError) -> Response {
    let status = if err.is_not_found() {
        Status::NotFound
    } else if err.is_client_error() {
        Status::BadRequest
    } else {
        Status::InternalServerError
    };

    if status == Status::InternalServerError {
        crate::log_error_with_context!(err, "Request failed");
    } else {
        tracing::warn!(error = %err, status = status.code(), "Request rejected");
    }
    Response::new(status, err.to_string())
}

/// Route table plus front controllers
pub struct Dispatcher {
    routes: HashMap<String, Arc<dyn Handler>>,
    fronts: Vec<Box<dyn Front>>,
    not_found: Arc<dyn Handler>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            fronts: Vec::new(),
            not_found: Arc::new(NotFoundHandler),
        }
    }

    /// Registers `handler` under the normalized `path`
    ///
    /// A later registration for the same path replaces the earlier one.
    pub fn register(&mut self, path: &str, handler: Arc<dyn Handler>) {
        let path = normalize(path);
        if self.routes.insert(path.clone(), handler).is_some() {
            tracing::debug!(path = %path, "Route replaced");
        }
    }

    /// Registers `handler` wrapped in a [`DebugHandler`] named `name`
    pub fn register_debug(&mut self, path: &str, name: &str, handler: Arc<dyn Handler>) {
        self.register(path, Arc::new(DebugHandler::new(name, handler)));
    }

    /// Appends a front; fronts run in the order they were added
    pub fn add_front(&mut self, front: Box<dyn Front>) {
        self.fronts.push(front);
    }

    /// Handler for `path`, or the not-found handler
    pub fn resolve(&self, path: &str) -> Arc<dyn Handler> {
        self.routes
            .get(&normalize(path))
            .cloned()
            .unwrap_or_else(|| Arc::clone(&self.not_found))
    }

    /// Whether a handler is registered for `path`
    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains_key(&normalize(path))
    }

    /// Registered paths, sorted
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    /// Applies the fronts, runs the resolved handler and converts its
    /// failure, if any, into a response
    pub async fn dispatch(&self, site: &Site, mut request: Request) -> Response {
        for front in &self.fronts {
            front.apply(&mut request);
        }

        let handler = self.resolve(&request.path);
        match handler.handle(site, &request).await {
            Ok(response) => response,
            Err(e) => error_response(&e),
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
