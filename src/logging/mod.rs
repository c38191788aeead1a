//! Logging and observability
//!
//! Two channels:
//! - [`structured`] - the `tracing` subscriber (console plus optional JSON
//!   file), used for diagnostics across the crate
//! - [`singleton`] - keyed application loggers, one instance per name
//!
//! # Example
//!
//! ```no_run
//! use polyclinic::logging::{get_logger, init_logging};
//! use polyclinic::config::LoggingConfig;
//!
//! let _guard = init_logging("info", &LoggingConfig::default()).expect("Failed to initialize logging");
//! get_logger("main").log("Application started");
//! ```

pub mod singleton;
pub mod structured;

// Re-export commonly used items
pub use singleton::{get_logger, get_logger_with, LogSink, Logger, LoggerRegistry};
pub use structured::{init_logging, LoggingGuard};

/// Log a handled request
///
/// # Example
///
/// ```no_run
/// use polyclinic::log_request;
/// use polyclinic::routing::{Method, Response};
///
/// let response = Response::ok("...");
/// log_request!(Method::Get, "/about/", &response);
/// ```
#[macro_export]
macro_rules! log_request {
    ($method:expr, $path:expr, $response:expr) => {
        tracing::info!(
            method = %$method,
            path = %$path,
            status = $response.status.code(),
            "Request handled"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use polyclinic::log_error_with_context;
/// use polyclinic::domain::PolyclinicError;
///
/// let error = PolyclinicError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
