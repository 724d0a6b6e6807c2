//! # rowgrid - Typed Result Tables for Dynamic SQL Stores
//!
//! rowgrid is an in-memory, dynamically-typed tabular value container: a
//! typed cell / row / table model for holding heterogeneous query results
//! and staging structured insert/update payloads, together with the
//! materialization protocol that fills a table from a cursor-shaped data
//! source.
//!
//! ## Quick Start
//!
//! ```ignore
//! use rowgrid::{fill_table, DataTable, Query, Row, Session};
//!
//! // read path: drain a driver cursor into a table
//! let mut table = DataTable::new(0);
//! let outcome = fill_table(&mut cursor, &mut table);
//! let name = table.get_string(0, 1);
//!
//! // write path: stage a row and hand it to the session
//! let mut values = Row::new(2);
//! values.put_long(0, 1, Some("id"));
//! values.put_string(1, b"Joy", 3, Some("name"));
//! let rowid = session.insert("people", &values)?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │        Session (facade, glue)        │
//! ├─────────────────────────────────────┤
//! │  Statement Assembly │ Bind Dispatch  │
//! ├─────────────────────┴───────────────┤
//! │   Materializer (cursor → table)      │
//! ├─────────────────────────────────────┤
//! │   DataTable (slots + type locks)     │
//! ├─────────────────────────────────────┤
//! │      Row (fixed-width cells)         │
//! ├─────────────────────────────────────┤
//! │   Cell (tagged value, owned buffer)  │
//! └─────────────────────────────────────┘
//! ```
//!
//! The store driver itself (open, prepare, native binds, stepping) is an
//! external collaborator reached through the [`session::Connection`] and
//! [`source::RowCursor`] traits; rowgrid owns no persisted bytes.
//!
//! ## Typing Discipline
//!
//! Columns are monomorphic once observed: the first typed write to a
//! table column locks it, and later writes of another type family are
//! rejected. Reads never fail on type mismatch; they report neutral
//! values (0 / 0.0 / None), mirroring the dynamic typing of the store.
//!
//! ## Module Overview
//!
//! - [`types`]: `DataType` tags and the owned tagged `Cell`
//! - [`table`]: fixed-width `Row`, growable `DataTable`
//! - [`source`]: the cursor contract and `fill_table`
//! - [`session`]: driver boundary, statement assembly, `Session` facade

pub mod session;
pub mod source;
pub mod table;
pub mod types;

pub use session::{Connection, Query, Session, Statement};
pub use source::{fill_table, FillEnd, FillOutcome, RowCursor, StepResult};
pub use table::{DataTable, Row};
pub use types::{Cell, DataType};
