//! # Row/Table Container Model
//!
//! This module provides the two container layers over [`crate::types::Cell`]:
//!
//! - [`Row`]: a fixed-width ordered sequence of cells, established at
//!   construction time, each optionally carrying a column-name label.
//!   Rows are the staging unit for insert/update payloads.
//! - [`DataTable`]: a growable sequence of lazily-allocated row slots
//!   sharing one column count and one type lock per column. Tables are
//!   the unit of result ownership returned by materialization.
//!
//! Both layers follow the store's dynamic-typing discipline: reads of
//! absent or mismatched values report neutral values instead of failing,
//! and every write reports success through its boolean return.

mod row;
#[allow(clippy::module_inception)]
mod table;

pub use row::Row;
pub use table::DataTable;
