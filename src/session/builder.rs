//! # Statement Assembly
//!
//! String assembly for the four DML/query shapes and the bind dispatch
//! that pairs them with a staged [`Row`]. This is mechanical glue: no
//! parsing, no validation of identifiers; callers own the SQL fragments
//! they pass in, and user data travels through bound parameters only.

use eyre::Result;

use super::Statement;
use crate::table::Row;
use crate::types::DataType;

/// Declarative SELECT specification assembled by [`build_select`].
///
/// Empty fields are omitted from the generated statement; an empty
/// column list selects `*`.
///
/// ```ignore
/// let q = Query::new("users")
///     .columns(&["id", "name"])
///     .filter("age > ?", &["18"])
///     .order_by("name");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Query<'a> {
    pub table: &'a str,
    pub columns: &'a [&'a str],
    pub distinct: bool,
    pub where_clause: &'a str,
    pub where_args: &'a [&'a str],
    pub group_by: &'a str,
    pub having: &'a str,
    pub order_by: &'a str,
    pub limit: &'a str,
}

impl<'a> Query<'a> {
    pub fn new(table: &'a str) -> Self {
        Self {
            table,
            ..Self::default()
        }
    }

    pub fn columns(mut self, columns: &'a [&'a str]) -> Self {
        self.columns = columns;
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn filter(mut self, where_clause: &'a str, where_args: &'a [&'a str]) -> Self {
        self.where_clause = where_clause;
        self.where_args = where_args;
        self
    }

    pub fn group_by(mut self, group_by: &'a str) -> Self {
        self.group_by = group_by;
        self
    }

    pub fn having(mut self, having: &'a str) -> Self {
        self.having = having;
        self
    }

    pub fn order_by(mut self, order_by: &'a str) -> Self {
        self.order_by = order_by;
        self
    }

    pub fn limit(mut self, limit: &'a str) -> Self {
        self.limit = limit;
        self
    }
}

fn push_clause(sql: &mut String, keyword: &str, value: &str) {
    if !value.is_empty() {
        sql.push(' ');
        sql.push_str(keyword);
        sql.push(' ');
        sql.push_str(value);
    }
}

/// Assembles a SELECT statement from a [`Query`] spec.
pub fn build_select(query: &Query<'_>) -> String {
    let mut sql = String::from("SELECT ");
    if query.distinct {
        sql.push_str("DISTINCT ");
    }

    let mut first = true;
    for column in query.columns.iter().filter(|c| !c.is_empty()) {
        if !first {
            sql.push_str(", ");
        }
        first = false;
        sql.push_str(column);
    }
    if first {
        sql.push('*');
    }

    sql.push_str(" FROM ");
    sql.push_str(query.table);

    push_clause(&mut sql, "WHERE", query.where_clause);
    push_clause(&mut sql, "GROUP BY", query.group_by);
    push_clause(&mut sql, "HAVING", query.having);
    push_clause(&mut sql, "ORDER BY", query.order_by);
    push_clause(&mut sql, "LIMIT", query.limit);

    sql
}

/// Assembles `INSERT INTO t(c0, ...) VALUES (?, ...)` with one
/// placeholder per column of `values`, named or not.
pub fn build_insert(table: &str, values: &Row) -> String {
    let count = values.column_count();
    let mut sql = String::from("INSERT INTO ");
    sql.push_str(table);
    sql.push('(');
    for i in 0..count {
        if i > 0 {
            sql.push_str(", ");
        }
        sql.push_str(values.column_name(i));
    }
    sql.push_str(") VALUES (");
    for i in 0..count {
        if i > 0 {
            sql.push_str(", ");
        }
        sql.push('?');
    }
    sql.push(')');
    sql
}

/// Assembles `UPDATE t SET c0=?, ... [WHERE ...]`.
pub fn build_update(table: &str, values: &Row, where_clause: &str) -> String {
    let mut sql = String::from("UPDATE ");
    sql.push_str(table);
    sql.push_str(" SET ");
    for i in 0..values.column_count() {
        if i > 0 {
            sql.push_str(", ");
        }
        sql.push_str(values.column_name(i));
        sql.push_str("=?");
    }
    push_clause(&mut sql, "WHERE", where_clause);
    sql
}

/// Assembles `DELETE FROM t [WHERE ...]`.
pub fn build_delete(table: &str, where_clause: &str) -> String {
    let mut sql = String::from("DELETE FROM ");
    sql.push_str(table);
    push_clause(&mut sql, "WHERE", where_clause);
    sql
}

/// Binds every populated column of `values` at its 1-based position,
/// type-dispatched to the matching primitive. Null cells are passed
/// through as unbound parameters, which the store reads back as NULL.
pub fn bind_row<S: Statement>(stmt: &mut S, values: &Row) -> Result<()> {
    for i in 0..values.column_count() {
        match values.data_type(i) {
            DataType::Integer => stmt.bind_long(i + 1, values.get_long(i))?,
            DataType::Float => stmt.bind_double(i + 1, values.get_double(i))?,
            DataType::String => {
                if let Some(text) = values.get_string(i) {
                    stmt.bind_text(i + 1, text)?;
                }
            }
            DataType::Blob => {
                if let Some(blob) = values.get_blob(i) {
                    stmt.bind_blob(i + 1, blob)?;
                }
            }
            DataType::Null => {}
        }
    }
    Ok(())
}

/// Binds `args` as text parameters starting after `offset` already-bound
/// positions.
pub fn bind_text_args<S: Statement>(stmt: &mut S, args: &[&str], offset: usize) -> Result<()> {
    for (i, arg) in args.iter().enumerate() {
        stmt.bind_text(offset + i + 1, arg.as_bytes())?;
    }
    Ok(())
}
