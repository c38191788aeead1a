//! Storage abstraction layer
//!
//! This module provides a trait-based abstraction for the relational store
//! behind the persistence mappers. Backends: [`MemoryConnection`] and
//! [`crate::adapters::postgresql::PostgresConnection`].

pub mod factory;
pub mod memory;
pub mod traits;

pub use factory::create_connection;
pub use memory::MemoryConnection;
pub use traits::{Connection, Execution, SqlRow, SqlValue, Statement};
