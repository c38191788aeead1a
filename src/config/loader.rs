//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{DatabaseTarget, LoggerSink, PolyclinicConfig, PostgreSQLConfig};
use super::secret::secret_string;
use crate::domain::errors::PolyclinicError;
use crate::domain::result::Result;
use crate::notification::FanOut;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into PolyclinicConfig
/// 4. Applies environment variable overrides (POLYCLINIC_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use polyclinic::config::loader::load_config;
///
/// let config = load_config("polyclinic.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<PolyclinicConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(PolyclinicError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        PolyclinicError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_str(&contents)
}

/// Loads configuration from TOML text
///
/// Same pipeline as [`load_config`] minus the file read.
///
/// # Errors
///
/// Returns an error on substitution, parse or validation failure.
pub fn load_config_str(contents: &str) -> Result<PolyclinicConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: PolyclinicConfig = toml::from_str(&contents)
        .map_err(|e| PolyclinicError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;
    finish(config)
}

/// Defaults plus `POLYCLINIC_*` overrides, for running without a file
///
/// # Errors
///
/// Returns an error if an override is malformed or the result is invalid.
pub fn load_default_config() -> Result<PolyclinicConfig> {
    let mut config = PolyclinicConfig::default();
    apply_env_overrides(&mut config)?;
    finish(config)
}

fn finish(config: PolyclinicConfig) -> Result<PolyclinicConfig> {
    config.validate().map_err(|e| {
        PolyclinicError::Configuration(format!("Configuration validation failed: {e}"))
    })?;
    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| PolyclinicError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&cap[0], &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(PolyclinicError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

fn parse_bool(name: &str, val: &str) -> Result<bool> {
    val.trim().parse().map_err(|_| {
        PolyclinicError::Configuration(format!("{name} must be true or false, got '{val}'"))
    })
}

/// Applies environment variable overrides using POLYCLINIC_* prefix
///
/// Environment variables follow the pattern: POLYCLINIC_<SECTION>_<KEY>
/// For example: POLYCLINIC_DATABASE_TARGET, POLYCLINIC_NOTIFICATIONS_FAN_OUT
fn apply_env_overrides(config: &mut PolyclinicConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("POLYCLINIC_APPLICATION_NAME") {
        config.application.name = val;
    }
    if let Ok(val) = std::env::var("POLYCLINIC_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Database overrides
    if let Ok(val) = std::env::var("POLYCLINIC_DATABASE_TARGET") {
        config.database.target = match val.to_lowercase().as_str() {
            "memory" => DatabaseTarget::Memory,
            "postgresql" => DatabaseTarget::PostgreSQL,
            other => {
                return Err(PolyclinicError::Configuration(format!(
                    "POLYCLINIC_DATABASE_TARGET must be memory or postgresql, got '{other}'"
                )))
            }
        };
    }
    if let Ok(val) = std::env::var("POLYCLINIC_POSTGRESQL_CONNECTION_STRING") {
        match config.postgresql {
            Some(ref mut pg) => pg.connection_string = secret_string(val),
            None => {
                config.postgresql = Some(PostgreSQLConfig {
                    connection_string: secret_string(val),
                    connect_timeout_seconds: 10,
                })
            }
        }
    }
    if let Some(ref mut pg) = config.postgresql {
        if let Ok(val) = std::env::var("POLYCLINIC_POSTGRESQL_CONNECT_TIMEOUT_SECONDS") {
            if let Ok(secs) = val.parse() {
                pg.connect_timeout_seconds = secs;
            }
        }
    }

    // Notification overrides
    if let Ok(val) = std::env::var("POLYCLINIC_NOTIFICATIONS_FAN_OUT") {
        config.notifications.fan_out = match val.to_lowercase().as_str() {
            "isolate" => FanOut::Isolate,
            "abort" => FanOut::Abort,
            other => {
                return Err(PolyclinicError::Configuration(format!(
                    "POLYCLINIC_NOTIFICATIONS_FAN_OUT must be isolate or abort, got '{other}'"
                )))
            }
        };
    }
    if let Ok(val) = std::env::var("POLYCLINIC_NOTIFICATIONS_EMAIL_ENABLED") {
        config.notifications.email_enabled =
            parse_bool("POLYCLINIC_NOTIFICATIONS_EMAIL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("POLYCLINIC_NOTIFICATIONS_SMS_ENABLED") {
        config.notifications.sms_enabled =
            parse_bool("POLYCLINIC_NOTIFICATIONS_SMS_ENABLED", &val)?;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("POLYCLINIC_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_bool("POLYCLINIC_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("POLYCLINIC_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("POLYCLINIC_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    // Logger overrides
    if let Ok(val) = std::env::var("POLYCLINIC_LOGGER_SINK") {
        config.logger.sink = match val.to_lowercase().as_str() {
            "console" => LoggerSink::Console,
            "tracing" => LoggerSink::Tracing,
            "file" => LoggerSink::File,
            other => {
                return Err(PolyclinicError::Configuration(format!(
                    "POLYCLINIC_LOGGER_SINK must be console, tracing or file, got '{other}'"
                )))
            }
        };
    }
    if let Ok(val) = std::env::var("POLYCLINIC_LOGGER_FILE_PATH") {
        config.logger.file_path = val;
    }

    Ok(())
}
