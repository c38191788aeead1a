//! The application
//!
//! [`Site`] owns the registry, the optional mapper registry, the renderer,
//! the notifiers attached to new clinics, the application logger and the
//! dispatcher. Requests are handled one at a time.

use super::registry::{Engine, IdAllocator};
use crate::adapters::database::create_connection;
use crate::adapters::persistence::MapperRegistry;
use crate::config::schema::{LoggerSink, PolyclinicConfig};
use crate::domain::Result;
use crate::logging::singleton::{
    get_logger_with, ConsoleSink, FileSink, LogSink, Logger, TracingSink,
};
use crate::notification::{EmailNotifier, FanOut, Observer, SmsNotifier};
use crate::routing::{DateFront, Dispatcher, Request, Response};
use crate::views::render::{JsonRenderer, Render};
use crate::views::routes::register_routes;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// Name of the application logger when none is configured
pub const DEFAULT_LOGGER: &str = "main";

/// Everything a request handler can reach
pub struct Site {
    engine: Mutex<Engine>,
    mappers: Option<MapperRegistry>,
    renderer: Arc<dyn Render>,
    notifiers: Vec<Arc<dyn Observer>>,
    logger: Arc<Logger>,
    dispatcher: Dispatcher,
    gate: Mutex<()>,
}

impl Site {
    pub fn builder() -> SiteBuilder {
        SiteBuilder::default()
    }

    /// Builds the application described by `config`
    ///
    /// Connects the configured store, attaches the enabled notifiers and
    /// registers every page route behind the date front.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached or the logger file
    /// cannot be opened.
    pub async fn from_config(config: &PolyclinicConfig) -> Result<Self> {
        let connection = create_connection(config).await?;

        let sink: Arc<dyn LogSink> = match config.logger.sink {
            LoggerSink::Console => Arc::new(ConsoleSink),
            LoggerSink::Tracing => Arc::new(TracingSink),
            LoggerSink::File => Arc::new(FileSink::open(&config.logger.file_path)?),
        };
        let logger = get_logger_with(&config.application.name, Arc::clone(&sink));

        let mut builder = Site::builder()
            .engine(Engine::new().with_fan_out(config.notifications.fan_out))
            .mappers(MapperRegistry::new(connection))
            .logger(logger);
        if config.notifications.email_enabled {
            builder = builder.notifier(Arc::new(EmailNotifier::new(Arc::clone(&sink))));
        }
        if config.notifications.sms_enabled {
            builder = builder.notifier(Arc::new(SmsNotifier::new(sink)));
        }

        tracing::info!(
            backend = ?config.database.target,
            fan_out = ?config.notifications.fan_out,
            "Site configured"
        );
        Ok(builder.build())
    }

    /// Exclusive access to the registry
    pub async fn engine(&self) -> MutexGuard<'_, Engine> {
        self.engine.lock().await
    }

    /// Mapper registry, when a store is configured
    pub fn mappers(&self) -> Option<&MapperRegistry> {
        self.mappers.as_ref()
    }

    /// Renders `view` with `context` through the configured renderer
    ///
    /// # Errors
    ///
    /// Returns the renderer's error.
    pub fn render(&self, view: &str, context: &Value) -> Result<String> {
        self.renderer.render(view, context)
    }

    /// Observers attached to clinics created through the pages
    pub fn notifiers(&self) -> &[Arc<dyn Observer>] {
        &self.notifiers
    }

    /// The application's keyed logger
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Handles one request
    ///
    /// Calls are serialized: a second request waits until the first one
    /// has produced its response.
    pub async fn handle(&self, request: Request) -> Response {
        let _gate = self.gate.lock().await;
        let method = request.method;
        let path = request.path.clone();
        let response = self.dispatcher.dispatch(self, request).await;
        crate::log_request!(method, path, &response);
        response
    }
}

/// Assembles a [`Site`]
///
/// Defaults: empty registry, no store, [`JsonRenderer`], no notifiers, the
/// keyed console logger `"main"`, and all page routes behind a
/// [`DateFront`].
#[derive(Default)]
pub struct SiteBuilder {
    engine: Option<Engine>,
    mappers: Option<MapperRegistry>,
    renderer: Option<Arc<dyn Render>>,
    notifiers: Vec<Arc<dyn Observer>>,
    logger: Option<Arc<Logger>>,
    dispatcher: Option<Dispatcher>,
}

impl SiteBuilder {
    pub fn engine(mut self, engine: Engine) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Registry drawing location ids from `allocator`
    pub fn allocator(self, allocator: Box<dyn IdAllocator>) -> Self {
        self.engine(Engine::with_allocator(allocator))
    }

    /// Registry whose clinics use `policy`
    pub fn fan_out(mut self, policy: FanOut) -> Self {
        let engine = self.engine.take().unwrap_or_default();
        self.engine = Some(engine.with_fan_out(policy));
        self
    }

    pub fn mappers(mut self, mappers: MapperRegistry) -> Self {
        self.mappers = Some(mappers);
        self
    }

    pub fn renderer(mut self, renderer: Arc<dyn Render>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Observer>) -> Self {
        self.notifiers.push(notifier);
        self
    }

    pub fn logger(mut self, logger: Arc<Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Replaces the default routes
    pub fn dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    pub fn build(self) -> Site {
        let dispatcher = self.dispatcher.unwrap_or_else(|| {
            let mut dispatcher = Dispatcher::new();
            dispatcher.add_front(Box::new(DateFront::new()));
            register_routes(&mut dispatcher);
            dispatcher
        });
        let logger = self
            .logger
            .unwrap_or_else(|| get_logger_with(DEFAULT_LOGGER, Arc::new(ConsoleSink)));

        Site {
            engine: Mutex::new(self.engine.unwrap_or_default()),
            mappers: self.mappers,
            renderer: self.renderer.unwrap_or_else(|| Arc::new(JsonRenderer)),
            notifiers: self.notifiers,
            logger,
            dispatcher,
            gate: Mutex::new(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::DatabaseTarget;
    use crate::logging::singleton::MemorySink;
    use crate::routing::Status;

    #[tokio::test]
    async fn test_default_site_serves_index() {
        let site = Site::builder().build();
        let response = site.handle(Request::get("/")).await;
        assert_eq!(response.status, Status::Ok);
        assert!(site.mappers().is_none());
    }

    #[tokio::test]
    async fn test_from_default_config() {
        let mut config = PolyclinicConfig::default();
        config.application.name = "site-test-from-config".to_string();
        config.logger.sink = LoggerSink::Tracing;

        let site = Site::from_config(&config).await.unwrap();
        assert_eq!(config.database.target, DatabaseTarget::Memory);
        assert!(site.mappers().is_some());
        assert_eq!(site.notifiers().len(), 2);
        assert_eq!(site.logger().name(), "site-test-from-config");
    }

    #[tokio::test]
    async fn test_disabled_notifiers_not_attached() {
        let mut config = PolyclinicConfig::default();
        config.application.name = "site-test-no-notifiers".to_string();
        config.logger.sink = LoggerSink::Tracing;
        config.notifications.email_enabled = false;
        config.notifications.sms_enabled = false;

        let site = Site::from_config(&config).await.unwrap();
        assert!(site.notifiers().is_empty());
    }

    #[tokio::test]
    async fn test_engine_access() {
        let sink = Arc::new(MemorySink::new());
        let site = Site::builder()
            .logger(Arc::new(Logger::new("local", sink)))
            .build();
        {
            let mut engine = site.engine().await;
            let location = engine.create_location("Center", None);
            engine.add_location(location);
        }
        assert_eq!(site.engine().await.locations().len(), 1);
    }
}
