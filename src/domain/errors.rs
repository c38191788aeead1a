//! Domain error types
//!
//! This module defines the error hierarchy for Polyclinic.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Polyclinic error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum PolyclinicError {
    /// A factory was asked for a kind it does not know
    #[error("Unknown kind: {0}")]
    UnknownKind(String),

    /// An entity looked up by id or name does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Inbound form text could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Persistence-related errors
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Notification fan-out errors
    #[error("Notification error: {0}")]
    Notification(#[from] NotifyError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network/connection errors
    #[error("Connection error: {0}")]
    Connection(String),

    /// Template rendering errors
    #[error("Render error: {0}")]
    Render(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Persistence-specific errors
///
/// Errors raised by the data mappers. Storage causes are carried as text
/// so the driver types stay inside the adapters.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// No row matches the requested id
    #[error("Record not found: {table} id={id}")]
    RecordNotFound { table: String, id: i64 },

    /// Insert statement or its commit failed
    #[error("Commit failed: {0}")]
    Commit(String),

    /// Update statement or its commit failed
    #[error("Update failed: {0}")]
    Update(String),

    /// Delete statement or its commit failed
    #[error("Delete failed: {0}")]
    Delete(String),

    /// Read query failed
    #[error("Query failed: {0}")]
    Query(String),

    /// Entity has no row id yet
    #[error("Entity is not persisted: {0}")]
    NotPersisted(String),
}

/// Observer fan-out errors
#[derive(Debug, Error)]
pub enum NotifyError {
    /// A single observer failed to deliver
    #[error("Observer '{observer}' failed: {reason}")]
    Delivery { observer: String, reason: String },

    /// Fan-out stopped at the first failure
    #[error("Fan-out aborted at observer '{observer}' ({skipped} skipped): {reason}")]
    Aborted {
        observer: String,
        reason: String,
        skipped: usize,
    },
}

impl PolyclinicError {
    /// True when the error means the requested entity or row does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PolyclinicError::NotFound(_)
                | PolyclinicError::Persistence(PersistenceError::RecordNotFound { .. })
        )
    }

    /// True when the error was caused by bad caller input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PolyclinicError::UnknownKind(_)
                | PolyclinicError::Decode(_)
                | PolyclinicError::Validation(_)
        )
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for PolyclinicError {
    fn from(err: std::io::Error) -> Self {
        PolyclinicError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for PolyclinicError {
    fn from(err: serde_json::Error) -> Self {
        PolyclinicError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for PolyclinicError {
    fn from(err: toml::de::Error) -> Self {
        PolyclinicError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polyclinic_error_display() {
        let err = PolyclinicError::UnknownKind("nurse".to_string());
        assert_eq!(err.to_string(), "Unknown kind: nurse");
    }

    #[test]
    fn test_persistence_error_conversion() {
        let err: PolyclinicError = PersistenceError::Commit("disk full".to_string()).into();
        assert!(matches!(
            err,
            PolyclinicError::Persistence(PersistenceError::Commit(_))
        ));
        assert_eq!(err.to_string(), "Persistence error: Commit failed: disk full");
    }

    #[test]
    fn test_record_not_found_is_not_found() {
        let err: PolyclinicError = PersistenceError::RecordNotFound {
            table: "patient".to_string(),
            id: 7,
        }
        .into();
        assert!(err.is_not_found());
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_client_errors() {
        assert!(PolyclinicError::Decode("=Z".to_string()).is_client_error());
        assert!(PolyclinicError::UnknownKind("x".to_string()).is_client_error());
        assert!(!PolyclinicError::Io("x".to_string()).is_client_error());
    }

    #[test]
    fn test_notify_error_conversion() {
        let err: PolyclinicError = NotifyError::Delivery {
            observer: "sms".to_string(),
            reason: "gateway down".to_string(),
        }
        .into();
        assert!(matches!(err, PolyclinicError::Notification(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: PolyclinicError = io_err.into();
        assert!(matches!(err, PolyclinicError::Io(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: PolyclinicError = toml_err.into();
        assert!(err.to_string().contains("TOML parse error"));
    }
}
