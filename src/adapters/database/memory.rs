//! In-process storage backend
//!
//! Tables live in memory. Mutating statements are staged when executed and
//! applied on commit. A failed commit keeps the staged writes in place, so
//! the next successful commit applies them.

use super::traits::{Connection, Execution, SqlRow, SqlValue, Statement};
use crate::domain::{PolyclinicError, Result};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, SqlRow>,
    next_id: i64,
}

#[derive(Debug, Default)]
struct State {
    tables: HashMap<String, Table>,
    staged: Vec<Statement>,
    issued: Vec<Statement>,
    commits: usize,
    fail_commits: Option<String>,
}

/// Memory-backed [`Connection`]
#[derive(Debug, Default)]
pub struct MemoryConnection {
    state: Mutex<State>,
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connection with empty tables already declared
    pub fn with_tables(tables: &[&str]) -> Self {
        let connection = Self::new();
        {
            let mut state = connection.lock();
            for table in tables {
                state.tables.entry((*table).to_string()).or_default();
            }
        }
        connection
    }

    /// Makes every later commit fail with `reason` until cleared
    pub fn fail_commits(&self, reason: impl Into<String>) {
        self.lock().fail_commits = Some(reason.into());
    }

    pub fn clear_commit_failure(&self) {
        self.lock().fail_commits = None;
    }

    /// Every mutating statement issued so far, in order
    pub fn issued(&self) -> Vec<Statement> {
        self.lock().issued.clone()
    }

    /// Mutating statements waiting for a commit
    pub fn pending(&self) -> usize {
        self.lock().staged.len()
    }

    /// Successful commits so far
    pub fn commits(&self) -> usize {
        self.lock().commits
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }
}

fn project(row: &SqlRow, columns: &[String]) -> SqlRow {
    let mut out = SqlRow::new();
    for column in columns {
        out.set(column, row.get(column).cloned().unwrap_or(SqlValue::Null));
    }
    out
}

fn apply(tables: &mut HashMap<String, Table>, statement: &Statement) {
    match statement {
        Statement::Insert { table, values } => {
            let table = tables.entry(table.clone()).or_default();
            let Some(id) = values
                .iter()
                .find(|(c, _)| c == "id")
                .and_then(|(_, v)| v.as_integer())
            else {
                return;
            };
            let mut row = SqlRow::new();
            for (column, value) in values {
                row.set(column, value.clone());
            }
            table.rows.insert(id, row);
        }
        Statement::Update { table, id, values } => {
            if let Some(row) = tables.get_mut(table).and_then(|t| t.rows.get_mut(id)) {
                for (column, value) in values {
                    row.set(column, value.clone());
                }
            }
        }
        Statement::Delete { table, id } => {
            if let Some(t) = tables.get_mut(table) {
                t.rows.remove(id);
            }
        }
        Statement::SelectAll { .. } | Statement::SelectById { .. } => {}
    }
}

#[async_trait]
impl Connection for MemoryConnection {
    fn backend(&self) -> &str {
        "memory"
    }

    async fn fetch(&self, statement: &Statement) -> Result<Vec<SqlRow>> {
        let state = self.lock();
        match statement {
            Statement::SelectAll { table, columns } => {
                let table = state.tables.get(table).ok_or_else(|| {
                    PolyclinicError::Connection(format!("no such table: {table}"))
                })?;
                Ok(table.rows.values().map(|r| project(r, columns)).collect())
            }
            Statement::SelectById { table, columns, id } => {
                let table = state.tables.get(table).ok_or_else(|| {
                    PolyclinicError::Connection(format!("no such table: {table}"))
                })?;
                Ok(table
                    .rows
                    .get(id)
                    .map(|r| project(r, columns))
                    .into_iter()
                    .collect())
            }
            other => Err(PolyclinicError::Connection(format!(
                "fetch called with a mutating statement: {other}"
            ))),
        }
    }

    async fn execute(&self, statement: &Statement) -> Result<Execution> {
        let mut guard = self.lock();
        let state = &mut *guard;
        let table_name = statement.table().to_string();
        let table = state.tables.get_mut(&table_name).ok_or_else(|| {
            PolyclinicError::Connection(format!("no such table: {table_name}"))
        })?;

        let (staged, execution) = match statement {
            Statement::Insert { table: name, values } => {
                table.next_id += 1;
                let id = table.next_id;
                let mut values = values.clone();
                values.retain(|(c, _)| c != "id");
                values.insert(0, ("id".to_string(), SqlValue::Integer(id)));
                (
                    Statement::Insert {
                        table: name.clone(),
                        values,
                    },
                    Execution {
                        rows_affected: 1,
                        last_insert_id: Some(id),
                    },
                )
            }
            Statement::Update { id, .. } | Statement::Delete { id, .. } => {
                let rows_affected = u64::from(table.rows.contains_key(id));
                (
                    statement.clone(),
                    Execution {
                        rows_affected,
                        last_insert_id: None,
                    },
                )
            }
            other => {
                return Err(PolyclinicError::Connection(format!(
                    "execute called with a select statement: {other}"
                )))
            }
        };

        tracing::trace!(statement = %staged, "Staged statement");
        state.issued.push(staged.clone());
        state.staged.push(staged);
        Ok(execution)
    }

    async fn commit(&self) -> Result<()> {
        let mut guard = self.lock();
        let state = &mut *guard;
        if let Some(reason) = &state.fail_commits {
            return Err(PolyclinicError::Connection(reason.clone()));
        }
        for statement in state.staged.drain(..) {
            apply(&mut state.tables, &statement);
        }
        state.commits += 1;
        Ok(())
    }
}
