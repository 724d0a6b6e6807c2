//! # Store Driver Boundary
//!
//! Traits the excluded store driver must implement for the session layer:
//! a connection that prepares statements, and a prepared statement that
//! accepts positional parameter binds and then behaves as a [`RowCursor`].
//!
//! Parameter positions are 1-based, matching the native bind primitives
//! of dynamic-typed SQL stores.

use eyre::{bail, Result};

use crate::source::{RowCursor, StepResult};

/// A prepared statement: bindable, then steppable as a cursor.
pub trait Statement: RowCursor {
    fn bind_long(&mut self, index: usize, value: i64) -> Result<()>;
    fn bind_double(&mut self, index: usize, value: f64) -> Result<()>;
    fn bind_text(&mut self, index: usize, value: &[u8]) -> Result<()>;
    fn bind_blob(&mut self, index: usize, value: &[u8]) -> Result<()>;
}

/// An open connection to a file-backed store.
pub trait Connection {
    type Statement: Statement;

    /// Compiles `sql` into a prepared, not-yet-stepped statement.
    fn prepare(&self, sql: &str) -> Result<Self::Statement>;

    /// Number of rows changed by the most recent DML statement.
    fn changes(&self) -> i64;

    /// Row identifier assigned by the most recent successful insert.
    fn last_insert_rowid(&self) -> i64;

    fn is_read_only(&self) -> bool {
        false
    }

    /// Runs a statement to completion, discarding any produced rows.
    fn exec(&self, sql: &str) -> Result<()> {
        let mut stmt = self.prepare(sql)?;
        loop {
            match stmt.step() {
                StepResult::Row => continue,
                StepResult::Done => return Ok(()),
                StepResult::Busy => bail!("store busy while executing: {sql}"),
                StepResult::Error => bail!("store error while executing: {sql}"),
            }
        }
    }
}

/// Counts `?` parameter placeholders in `sql`, skipping quoted literals.
///
/// Escaped quotes (`''`) toggle the string state twice, which nets out
/// correctly for this glue-level scan.
pub fn count_parameters(sql: &str) -> usize {
    let mut count = 0;
    let mut in_string = false;

    for c in sql.chars() {
        match c {
            '\'' => in_string = !in_string,
            '?' if !in_string => count += 1,
            _ => {}
        }
    }

    count
}
