//! # Store Session
//!
//! `Session` wraps an open [`Connection`] to a file-backed store and
//! exposes the caller-facing read and write entrypoints: assembled
//! queries materialized into [`DataTable`]s, and row-staged DML executed
//! through positional binds.
//!
//! ## Read Policy
//!
//! `raw_query` keeps the legacy policy of the store helpers this model
//! descends from: a query that materializes zero rows reports `Ok(None)`
//! ("no result"), whether the result set was empty or the fill aborted
//! before the first row. `raw_query_with_outcome` is the discriminating
//! entrypoint; it hands back the table together with the fill's
//! termination state.
//!
//! ## Concurrency
//!
//! All store operations run synchronously on the calling thread. The
//! connection slot sits behind a `parking_lot::Mutex`, so a `Session` can
//! be shared while each statement still runs to completion before the
//! next proceeds.

use std::path::{Path, PathBuf};

use eyre::{bail, ensure, Result};
use parking_lot::Mutex;

use super::builder::{
    bind_row, bind_text_args, build_delete, build_insert, build_select, build_update, Query,
};
use super::connection::{count_parameters, Connection, Statement};
use crate::source::{fill_table, FillOutcome, StepResult};
use crate::table::{DataTable, Row};

/// An open session against a file-backed store, generic over the driver.
pub struct Session<C: Connection> {
    path: PathBuf,
    conn: Mutex<Option<C>>,
}

impl<C: Connection> Session<C> {
    /// Wraps a connection the driver opened for `path`.
    pub fn open(path: impl Into<PathBuf>, conn: C) -> Self {
        Self {
            path: path.into(),
            conn: Mutex::new(Some(conn)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.conn.lock().is_some()
    }

    /// Releases the connection. A second close fails.
    pub fn close(&self) -> Result<()> {
        let mut guard = self.conn.lock();
        ensure!(guard.is_some(), "session already closed");
        *guard = None;
        Ok(())
    }

    fn with_conn<R>(&self, f: impl FnOnce(&C) -> Result<R>) -> Result<R> {
        let guard = self.conn.lock();
        match guard.as_ref() {
            Some(conn) => f(conn),
            None => bail!("session is closed"),
        }
    }

    /// Runs a statement that produces no result set.
    pub fn exec(&self, sql: &str) -> Result<()> {
        self.with_conn(|conn| conn.exec(sql))
    }

    /// Prepares `sql`, binds `args` as text parameters, and materializes
    /// the result. Zero materialized rows report `Ok(None)`.
    pub fn raw_query(&self, sql: &str, args: &[&str]) -> Result<Option<DataTable>> {
        let (table, outcome) = self.raw_query_with_outcome(sql, args)?;
        if outcome.rows_added == 0 {
            Ok(None)
        } else {
            Ok(Some(table))
        }
    }

    /// Like [`Session::raw_query`], but always hands back the table and
    /// the fill's termination state, so an empty result is
    /// distinguishable from an aborted one.
    pub fn raw_query_with_outcome(
        &self,
        sql: &str,
        args: &[&str],
    ) -> Result<(DataTable, FillOutcome)> {
        self.with_conn(|conn| {
            let expected = count_parameters(sql);
            ensure!(
                args.len() == expected,
                "parameter count mismatch: statement has {} placeholders but {} arguments were given",
                expected,
                args.len()
            );

            let mut stmt = conn.prepare(sql)?;
            bind_text_args(&mut stmt, args, 0)?;

            let mut table = DataTable::new(0);
            let outcome = fill_table(&mut stmt, &mut table);
            Ok((table, outcome))
        })
    }

    /// Assembles and runs a SELECT from a [`Query`] spec.
    pub fn query(&self, query: &Query<'_>) -> Result<Option<DataTable>> {
        self.raw_query(&build_select(query), query.where_args)
    }

    /// Inserts one staged row; returns the identifier the store assigned.
    pub fn insert(&self, table: &str, values: &Row) -> Result<i64> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&build_insert(table, values))?;
            bind_row(&mut stmt, values)?;
            step_to_done(&mut stmt)?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Updates rows matching `where_clause` from one staged row; returns
    /// the change count. Where-arguments bind after the row's parameters.
    pub fn update(
        &self,
        table: &str,
        values: &Row,
        where_clause: &str,
        where_args: &[&str],
    ) -> Result<i64> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&build_update(table, values, where_clause))?;
            bind_row(&mut stmt, values)?;
            bind_text_args(&mut stmt, where_args, values.column_count())?;
            step_to_done(&mut stmt)?;
            Ok(conn.changes())
        })
    }

    /// Deletes rows matching `where_clause`; returns the change count.
    pub fn delete(&self, table: &str, where_clause: &str, where_args: &[&str]) -> Result<i64> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&build_delete(table, where_clause))?;
            bind_text_args(&mut stmt, where_args, 0)?;
            step_to_done(&mut stmt)?;
            Ok(conn.changes())
        })
    }

    /// Reads the store's user version.
    pub fn version(&self) -> Result<i64> {
        match self.raw_query("PRAGMA user_version", &[])? {
            Some(table) => Ok(table.get_long(0, 0)),
            None => Ok(0),
        }
    }

    /// Writes the store's user version.
    pub fn set_version(&self, version: i64) -> Result<()> {
        self.exec(&format!("PRAGMA user_version = {version}"))
    }

    pub fn is_read_only(&self) -> Result<bool> {
        self.with_conn(|conn| Ok(conn.is_read_only()))
    }
}

fn step_to_done<S: Statement>(stmt: &mut S) -> Result<()> {
    match stmt.step() {
        StepResult::Done => Ok(()),
        StepResult::Row => bail!("statement produced rows where none were expected"),
        StepResult::Busy => bail!("store busy"),
        StepResult::Error => bail!("store error"),
    }
}
