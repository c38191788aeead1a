//! Patient data mapper
//!
//! Table `patient (id INTEGER PRIMARY KEY, name TEXT)`. Every mutating
//! operation issues exactly one statement and commits right after it. A
//! failure is reported as the operation's own error and is not retried.
//! The PostgreSQL backend rolls back a failed statement's transaction.

use crate::adapters::database::traits::{Connection, SqlRow, SqlValue, Statement};
use crate::domain::{Patient, PersistenceError, PolyclinicError, Result};
use std::sync::Arc;

/// Table the mapper reads and writes
pub const PATIENT_TABLE: &str = "patient";

const COLUMNS: [&str; 2] = ["id", "name"];

/// Maps [`Patient`] to rows of the `patient` table
#[derive(Clone)]
pub struct PatientMapper {
    connection: Arc<dyn Connection>,
}

impl PatientMapper {
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        Self { connection }
    }

    fn columns() -> Vec<String> {
        COLUMNS.iter().map(|c| c.to_string()).collect()
    }

    fn from_row(row: &SqlRow) -> Result<Patient> {
        let id = row.integer("id").ok_or_else(|| {
            PolyclinicError::Serialization("patient row without integer id".to_string())
        })?;
        let name = row.text("name").unwrap_or_default();
        Ok(Patient::persisted(id, name))
    }

    fn row_id(patient: &Patient) -> Result<i64> {
        patient.id.ok_or_else(|| {
            PersistenceError::NotPersisted(format!("patient '{}' has no id", patient.name)).into()
        })
    }

    /// Every stored patient, tagged with its row id
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Query` if the select fails.
    pub async fn all(&self) -> Result<Vec<Patient>> {
        let statement = Statement::SelectAll {
            table: PATIENT_TABLE.to_string(),
            columns: Self::columns(),
        };
        let rows = self
            .connection
            .fetch(&statement)
            .await
            .map_err(|e| PersistenceError::Query(e.to_string()))?;
        rows.iter().map(Self::from_row).collect()
    }

    /// The patient stored under `id`
    ///
    /// # Errors
    ///
    /// - `PersistenceError::RecordNotFound` if no row has that id
    /// - `PersistenceError::Query` if the select fails
    pub async fn find_by_id(&self, id: i64) -> Result<Patient> {
        let statement = Statement::SelectById {
            table: PATIENT_TABLE.to_string(),
            columns: Self::columns(),
            id,
        };
        let rows = self
            .connection
            .fetch(&statement)
            .await
            .map_err(|e| PersistenceError::Query(e.to_string()))?;

        match rows.first() {
            Some(row) => Self::from_row(row),
            None => Err(PersistenceError::RecordNotFound {
                table: PATIENT_TABLE.to_string(),
                id,
            }
            .into()),
        }
    }

    /// Inserts `patient` and commits
    ///
    /// The generated id is written back into `patient` and returned.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Commit` carrying the cause if the insert
    /// or its commit fails.
    pub async fn insert(&self, patient: &mut Patient) -> Result<i64> {
        let statement = Statement::Insert {
            table: PATIENT_TABLE.to_string(),
            values: vec![("name".to_string(), SqlValue::from(patient.name.as_str()))],
        };
        let execution = self
            .connection
            .execute(&statement)
            .await
            .map_err(|e| PersistenceError::Commit(e.to_string()))?;
        self.connection
            .commit()
            .await
            .map_err(|e| PersistenceError::Commit(e.to_string()))?;

        let id = execution.last_insert_id.ok_or_else(|| {
            PersistenceError::Commit("backend returned no id for insert".to_string())
        })?;
        patient.id = Some(id);
        tracing::debug!(id, name = %patient.name, "Inserted patient");
        Ok(id)
    }

    /// Writes `patient.name` to its row and commits
    ///
    /// # Errors
    ///
    /// - `PersistenceError::NotPersisted` if `patient` has no id
    /// - `PersistenceError::Update` if the statement or its commit fails
    /// - `PersistenceError::RecordNotFound` if no row had that id
    pub async fn update(&self, patient: &Patient) -> Result<()> {
        let id = Self::row_id(patient)?;
        let statement = Statement::Update {
            table: PATIENT_TABLE.to_string(),
            id,
            values: vec![("name".to_string(), SqlValue::from(patient.name.as_str()))],
        };
        let execution = self
            .connection
            .execute(&statement)
            .await
            .map_err(|e| PersistenceError::Update(e.to_string()))?;
        self.connection
            .commit()
            .await
            .map_err(|e| PersistenceError::Update(e.to_string()))?;

        if execution.rows_affected == 0 {
            return Err(PersistenceError::RecordNotFound {
                table: PATIENT_TABLE.to_string(),
                id,
            }
            .into());
        }
        tracing::debug!(id, name = %patient.name, "Updated patient");
        Ok(())
    }

    /// Removes the row of `patient` and commits
    ///
    /// # Errors
    ///
    /// - `PersistenceError::NotPersisted` if `patient` has no id
    /// - `PersistenceError::Delete` if the statement or its commit fails
    /// - `PersistenceError::RecordNotFound` if no row had that id
    pub async fn delete(&self, patient: &Patient) -> Result<()> {
        let id = Self::row_id(patient)?;
        let statement = Statement::Delete {
            table: PATIENT_TABLE.to_string(),
            id,
        };
        let execution = self
            .connection
            .execute(&statement)
            .await
            .map_err(|e| PersistenceError::Delete(e.to_string()))?;
        self.connection
            .commit()
            .await
            .map_err(|e| PersistenceError::Delete(e.to_string()))?;

        if execution.rows_affected == 0 {
            return Err(PersistenceError::RecordNotFound {
                table: PATIENT_TABLE.to_string(),
                id,
            }
            .into());
        }
        tracing::debug!(id, "Deleted patient");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::database::memory::MemoryConnection;

    fn mapper() -> (PatientMapper, Arc<MemoryConnection>) {
        let conn = Arc::new(MemoryConnection::with_tables(&[PATIENT_TABLE]));
        (PatientMapper::new(conn.clone()), conn)
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let (mapper, _) = mapper();
        let mut patient = Patient::new("Anna");
        let id = mapper.insert(&mut patient).await.unwrap();

        assert_eq!(patient.id, Some(id));
        let found = mapper.find_by_id(id).await.unwrap();
        assert_eq!(found.name, "Anna");
        assert_eq!(found.id, Some(id));
    }

    #[tokio::test]
    async fn test_all_returns_tagged_rows() {
        let (mapper, _) = mapper();
        for name in ["Anna", "Boris"] {
            mapper.insert(&mut Patient::new(name)).await.unwrap();
        }
        let all = mapper.all().await.unwrap();
        let names: Vec<&str> = all.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Anna", "Boris"]);
        assert!(all.iter().all(|p| p.id.is_some()));
    }

    #[tokio::test]
    async fn test_update_changes_name() {
        let (mapper, _) = mapper();
        let mut patient = Patient::new("Anna");
        let id = mapper.insert(&mut patient).await.unwrap();
        patient.name = "Anna K".to_string();
        mapper.update(&patient).await.unwrap();
        assert_eq!(mapper.find_by_id(id).await.unwrap().name, "Anna K");
    }

    #[tokio::test]
    async fn test_delete_then_find_is_record_not_found() {
        let (mapper, _) = mapper();
        let mut patient = Patient::new("Anna");
        let id = mapper.insert(&mut patient).await.unwrap();
        mapper.delete(&patient).await.unwrap();

        let err = mapper.find_by_id(id).await.unwrap_err();
        assert!(matches!(
            err,
            PolyclinicError::Persistence(PersistenceError::RecordNotFound { id: missing, .. })
                if missing == id
        ));
    }

    #[tokio::test]
    async fn test_commit_failure_is_typed_per_operation() {
        let (mapper, conn) = mapper();
        let mut patient = Patient::new("Anna");
        mapper.insert(&mut patient).await.unwrap();

        conn.fail_commits("disk full");
        let err = mapper.insert(&mut Patient::new("Boris")).await.unwrap_err();
        assert!(matches!(
            err,
            PolyclinicError::Persistence(PersistenceError::Commit(ref cause)) if cause.contains("disk full")
        ));
        assert!(matches!(
            mapper.update(&patient).await.unwrap_err(),
            PolyclinicError::Persistence(PersistenceError::Update(_))
        ));
        assert!(matches!(
            mapper.delete(&patient).await.unwrap_err(),
            PolyclinicError::Persistence(PersistenceError::Delete(_))
        ));
        // One insert + insert + update + delete issued, none rolled back
        assert_eq!(conn.issued().len(), 4);
        assert_eq!(conn.pending(), 3);
    }

    #[tokio::test]
    async fn test_unpersisted_patient_rejected() {
        let (mapper, conn) = mapper();
        let err = mapper.update(&Patient::new("Anna")).await.unwrap_err();
        assert!(matches!(
            err,
            PolyclinicError::Persistence(PersistenceError::NotPersisted(_))
        ));
        assert!(conn.issued().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_row() {
        let (mapper, _) = mapper();
        let err = mapper.delete(&Patient::persisted(42, "Ghost")).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
