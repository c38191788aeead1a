//! CLI interface and argument parsing
//!
//! The CLI feeds requests to one in-process [`Site`](crate::core::site::Site)
//! built from the configuration.

pub mod commands;

use crate::config::LoggingConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Polyclinic - clinic registry and route dispatcher
#[derive(Parser, Debug)]
#[command(name = "polyclinic")]
#[command(version, about, long_about = None)]
#[command(author = "Polyclinic Contributors")]
pub struct Cli {
    /// Path to configuration file; defaults plus environment when omitted
    #[arg(short, long, env = "POLYCLINIC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "POLYCLINIC_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log level and `[logging]` section for the subscriber
    ///
    /// `--log-level` wins over `application.log_level`. A configuration that
    /// fails to load yields the defaults; the command itself reports the
    /// failure once logging is up.
    pub fn logging_settings(&self) -> (String, LoggingConfig) {
        match commands::resolve_config(self.config.as_deref()) {
            Ok(config) => (
                self.log_level.clone().unwrap_or(config.application.log_level),
                config.logging,
            ),
            Err(_) => (
                self.log_level.clone().unwrap_or_else(|| "info".to_string()),
                LoggingConfig::default(),
            ),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dispatch a single request and print the response
    Request(commands::request::RequestArgs),

    /// Dispatch every request of a JSON-lines file against one site
    Replay(commands::replay::ReplayArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),
}
