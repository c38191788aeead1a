//! Storage integrations for Polyclinic.
//!
//! - [`database`] - Connection trait, statement model, in-memory backend
//! - [`postgresql`] - PostgreSQL backend
//! - [`persistence`] - Data mappers written against the connection trait
//!
//! # Example
//!
//! ```rust
//! use polyclinic::adapters::database::MemoryConnection;
//! use polyclinic::adapters::persistence::{MapperRegistry, PATIENT_TABLE};
//! use polyclinic::domain::Patient;
//! use std::sync::Arc;
//!
//! # async fn example() -> polyclinic::domain::Result<()> {
//! let registry = MapperRegistry::new(Arc::new(MemoryConnection::with_tables(&[PATIENT_TABLE])));
//! let mapper = registry.for_kind("patient")?;
//!
//! let mut patient = Patient::new("Anna");
//! let id = mapper.insert(&mut patient).await?;
//! assert_eq!(mapper.find_by_id(id).await?.name, "Anna");
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod persistence;
pub mod postgresql;
