//! # Cursor Contract and Materialization
//!
//! This module defines the boundary between the table model and the
//! excluded store driver on the read path, and the procedure that fills
//! a table from it.
//!
//! ## Components
//!
//! | Item | Purpose |
//! |---------------|-----------------------------------------------|
//! | `StepResult` | One-record advance outcome: Row/Done/Busy/Error |
//! | `RowCursor` | Cursor-shaped data source trait |
//! | `fill_table` | Drain a cursor into a `DataTable` |
//! | `FillOutcome` | Rows added + explicit termination discriminator |
//!
//! ## Control Flow
//!
//! ```text
//! caller                     fill_table                    RowCursor
//!   │  empty DataTable  ──────────►│                           │
//!   │                              │── step() ────────────────►│
//!   │                              │◄─ Row ─────────────────────│
//!   │                              │── column_type/long/... ──►│
//!   │                              │   table.put_* per column  │
//!   │                              │── step() ... ────────────►│
//!   │                              │◄─ Done / Busy / Error ─────│
//!   │◄─ FillOutcome ───────────────│                           │
//! ```

mod cursor;
mod fill;

pub use cursor::{RowCursor, StepResult};
pub use fill::{fill_table, FillEnd, FillOutcome};
