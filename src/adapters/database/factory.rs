//! Storage connection factory
//!
//! This module creates the shared connection selected by configuration.

use crate::adapters::database::memory::MemoryConnection;
use crate::adapters::database::traits::Connection;
use crate::adapters::persistence::patient::PATIENT_TABLE;
use crate::adapters::postgresql::client::PostgresConnection;
use crate::config::schema::{DatabaseTarget, PolyclinicConfig};
use crate::domain::{PolyclinicError, Result};
use std::sync::Arc;

/// Create the storage connection based on the configuration
///
/// The memory backend comes with the `patient` table declared.
///
/// # Errors
///
/// Returns an error if the PostgreSQL section is missing or the server
/// cannot be reached.
pub async fn create_connection(config: &PolyclinicConfig) -> Result<Arc<dyn Connection>> {
    match config.database.target {
        DatabaseTarget::Memory => {
            tracing::info!("Creating in-memory storage connection");
            Ok(Arc::new(MemoryConnection::with_tables(&[PATIENT_TABLE])))
        }
        DatabaseTarget::PostgreSQL => {
            let pg_config = config.postgresql.as_ref().ok_or_else(|| {
                PolyclinicError::Configuration(
                    "postgresql configuration is required when database.target = 'postgresql'"
                        .to_string(),
                )
            })?;

            tracing::info!("Creating PostgreSQL storage connection");
            let connection = PostgresConnection::connect(pg_config).await?;
            connection.test_connection().await?;
            Ok(Arc::new(connection))
        }
    }
}
