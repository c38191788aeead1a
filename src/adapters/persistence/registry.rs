//! Mapper lookup
//!
//! Every mapper handed out by a [`MapperRegistry`] shares the registry's
//! single connection.

use super::patient::PatientMapper;
use crate::adapters::database::traits::Connection;
use crate::domain::{PolyclinicError, Result, User, UserKind};
use std::str::FromStr;
use std::sync::Arc;

/// Resolves entities and kind names to their mapper
#[derive(Clone)]
pub struct MapperRegistry {
    connection: Arc<dyn Connection>,
}

impl MapperRegistry {
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        Self { connection }
    }

    /// The shared connection
    pub fn connection(&self) -> Arc<dyn Connection> {
        Arc::clone(&self.connection)
    }

    /// Mapper for `user`'s kind
    ///
    /// # Errors
    ///
    /// Returns `PolyclinicError::UnknownKind` if the kind is not persisted.
    pub fn get_mapper(&self, user: &User) -> Result<PatientMapper> {
        self.mapper_for(user.kind())
    }

    /// Mapper for the kind named `name` (for example `"patient"`)
    ///
    /// # Errors
    ///
    /// Returns `PolyclinicError::UnknownKind` for names without a mapper.
    pub fn for_kind(&self, name: &str) -> Result<PatientMapper> {
        let kind = UserKind::from_str(name)
            .map_err(|_| PolyclinicError::UnknownKind(format!("no mapper for '{name}'")))?;
        self.mapper_for(kind)
    }

    fn mapper_for(&self, kind: UserKind) -> Result<PatientMapper> {
        match kind {
            UserKind::Patient => Ok(PatientMapper::new(self.connection())),
            UserKind::Doctor => Err(PolyclinicError::UnknownKind(format!(
                "no mapper for '{kind}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::database::memory::MemoryConnection;
    use crate::adapters::persistence::patient::PATIENT_TABLE;
    use crate::domain::Patient;
    use test_case::test_case;

    fn registry() -> MapperRegistry {
        MapperRegistry::new(Arc::new(MemoryConnection::with_tables(&[PATIENT_TABLE])))
    }

    #[test_case("doctor" ; "known kind without mapper")]
    #[test_case("clinic" ; "unknown kind")]
    #[test_case("" ; "empty name")]
    fn test_for_kind_rejects(name: &str) {
        let err = registry().for_kind(name).err().unwrap();
        assert!(matches!(err, PolyclinicError::UnknownKind(_)));
    }

    #[tokio::test]
    async fn test_mappers_share_connection() {
        let registry = registry();
        let by_name = registry.for_kind("patient").unwrap();
        let by_user = registry
            .get_mapper(&User::Patient(Patient::new("x")))
            .unwrap();

        let id = by_name.insert(&mut Patient::new("Anna")).await.unwrap();
        assert_eq!(by_user.find_by_id(id).await.unwrap().name, "Anna");
    }

    #[test]
    fn test_doctor_has_no_mapper() {
        let err = registry()
            .get_mapper(&User::new(UserKind::Doctor, "House"))
            .err()
            .unwrap();
        assert!(err.to_string().contains("doctor"));
    }
}
