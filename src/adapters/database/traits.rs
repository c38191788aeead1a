//! Storage connection traits
//!
//! This module defines the statement model every backend executes and the
//! [`Connection`] trait the persistence mappers are written against.

use crate::domain::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt;

/// A single column value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Integer(i64),
    Text(String),
    Null,
}

impl SqlValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SqlValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SqlValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Integer(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

/// A fetched row, keyed by column name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlRow {
    columns: BTreeMap<String, SqlValue>,
}

impl SqlRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style column setter
    pub fn with(mut self, column: &str, value: impl Into<SqlValue>) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: &str, value: impl Into<SqlValue>) {
        self.columns.insert(column.to_string(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.columns.get(column)
    }

    pub fn integer(&self, column: &str) -> Option<i64> {
        self.get(column).and_then(SqlValue::as_integer)
    }

    pub fn text(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(SqlValue::as_text)
    }
}

/// One statement against a table with an integer `id` primary key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// Every row of the table
    SelectAll { table: String, columns: Vec<String> },

    /// The row whose `id` matches
    SelectById {
        table: String,
        columns: Vec<String>,
        id: i64,
    },

    /// A new row; the backend assigns `id`
    Insert {
        table: String,
        values: Vec<(String, SqlValue)>,
    },

    /// Overwrites columns of the row whose `id` matches
    Update {
        table: String,
        id: i64,
        values: Vec<(String, SqlValue)>,
    },

    /// Removes the row whose `id` matches
    Delete { table: String, id: i64 },
}

impl Statement {
    pub fn table(&self) -> &str {
        match self {
            Statement::SelectAll { table, .. }
            | Statement::SelectById { table, .. }
            | Statement::Insert { table, .. }
            | Statement::Update { table, .. }
            | Statement::Delete { table, .. } => table,
        }
    }

    /// True for insert, update and delete
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Statement::Insert { .. } | Statement::Update { .. } | Statement::Delete { .. }
        )
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::SelectAll { table, .. } => write!(f, "SELECT {table}"),
            Statement::SelectById { table, id, .. } => write!(f, "SELECT {table} id={id}"),
            Statement::Insert { table, .. } => write!(f, "INSERT {table}"),
            Statement::Update { table, id, .. } => write!(f, "UPDATE {table} id={id}"),
            Statement::Delete { table, id } => write!(f, "DELETE {table} id={id}"),
        }
    }
}

/// Outcome of a mutating statement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Execution {
    /// Rows written or removed
    pub rows_affected: u64,

    /// Id assigned by an insert
    pub last_insert_id: Option<i64>,
}

/// A shared storage connection
///
/// Mutating statements become visible to other readers only after
/// [`Connection::commit`]. Implementations do not retry and do not roll
/// back on a failed commit.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Backend name for logs ("memory", "postgresql")
    fn backend(&self) -> &str;

    /// Runs a select statement
    ///
    /// # Errors
    ///
    /// Returns an error if the statement is not a select or the query fails.
    async fn fetch(&self, statement: &Statement) -> Result<Vec<SqlRow>>;

    /// Issues a mutating statement
    ///
    /// # Errors
    ///
    /// Returns an error if the statement is a select or the backend rejects it.
    async fn execute(&self, statement: &Statement) -> Result<Execution>;

    /// Commits everything issued since the last commit
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails. Issued statements stay issued.
    async fn commit(&self) -> Result<()>;

    /// Checks that the backend is reachable
    ///
    /// # Errors
    ///
    /// Returns an error if the connection test fails.
    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_accessors() {
        let row = SqlRow::new().with("id", 3_i64).with("name", "Anna");
        assert_eq!(row.integer("id"), Some(3));
        assert_eq!(row.text("name"), Some("Anna"));
        assert_eq!(row.text("id"), None);
        assert!(row.get("missing").is_none());
    }

    #[test]
    fn test_statement_is_mutation() {
        let select = Statement::SelectAll {
            table: "patient".to_string(),
            columns: vec!["id".to_string()],
        };
        let delete = Statement::Delete {
            table: "patient".to_string(),
            id: 1,
        };
        assert!(!select.is_mutation());
        assert!(delete.is_mutation());
        assert_eq!(delete.table(), "patient");
        assert_eq!(delete.to_string(), "DELETE patient id=1");
    }
}
