//! `validate-config` command

use super::{resolve_config, EXIT_CONFIG, EXIT_OK};
use crate::adapters::postgresql::client::connection_string_safe;
use crate::config::schema::DatabaseTarget;
use clap::Args;
use secrecy::ExposeSecret;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Loading already validates, so a loaded config is a valid one.
    pub async fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<i32> {
        let source = config_path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<defaults>".to_string());
        tracing::info!(config_path = %source, "Validating configuration");
        println!("Validating configuration: {source}");

        let config = match resolve_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        println!("Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Application: {}", config.application.name);
        println!("  Log Level: {}", config.application.log_level);
        match config.database.target {
            DatabaseTarget::Memory => println!("  Database Target: memory"),
            DatabaseTarget::PostgreSQL => {
                println!("  Database Target: postgresql");
                if let Some(ref pg) = config.postgresql {
                    println!(
                        "  PostgreSQL Connection: {}",
                        connection_string_safe(pg.connection_string.expose_secret().as_ref())
                    );
                    println!("  Connect Timeout: {}s", pg.connect_timeout_seconds);
                }
            }
        }
        println!("  Fan-out: {:?}", config.notifications.fan_out);
        println!("  Email Notifier: {}", config.notifications.email_enabled);
        println!("  SMS Notifier: {}", config.notifications.sms_enabled);
        println!("  Logger Sink: {:?}", config.logger.sink);
        if config.logging.local_enabled {
            println!(
                "  Log Files: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        Ok(EXIT_OK)
    }
}
