//! Configuration management for Polyclinic.
//!
//! # Overview
//!
//! Polyclinic reads an optional TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `POLYCLINIC_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use polyclinic::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("polyclinic.toml")?;
//! println!("Backend: {:?}", config.database.target);
//! println!("Fan-out: {:?}", config.notifications.fan_out);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application name and log level
//! - [`DatabaseConfig`] - Storage backend selection
//! - [`PostgreSQLConfig`] - PostgreSQL connection
//! - [`NotificationConfig`] - Observer fan-out policy and notifiers
//! - [`LoggingConfig`] - `tracing` console and file output
//! - [`LoggerConfig`] - Sink for the keyed application loggers
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! name = "polyclinic"
//! log_level = "info"
//!
//! [database]
//! target = "postgresql"
//!
//! [postgresql]
//! connection_string = "${POLYCLINIC_DATABASE_URL}"
//!
//! [notifications]
//! fan_out = "isolate"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_str, load_default_config};
pub use schema::{
    ApplicationConfig, DatabaseConfig, DatabaseTarget, LoggerConfig, LoggerSink, LoggingConfig,
    NotificationConfig, PolyclinicConfig, PostgreSQLConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
