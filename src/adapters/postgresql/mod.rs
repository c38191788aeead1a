//! PostgreSQL storage backend
//!
//! This module provides the [`PostgresConnection`] used by the persistence
//! mappers when `database.target = "postgresql"`. The `patient` table must
//! already exist:
//!
//! ```sql
//! CREATE TABLE patient (id SERIAL PRIMARY KEY, name TEXT);
//! ```

pub mod client;

pub use client::PostgresConnection;
