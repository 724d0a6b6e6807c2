//! # Session Layer
//!
//! The thin glue between the table model and a file-backed store driver:
//!
//! - `connection`: the driver boundary, the [`Connection`] and
//!   [`Statement`] traits (prepare, positional bind, step, change counts).
//! - `builder`: statement assembly, the [`Query`] specs, the
//!   SELECT/INSERT/UPDATE/DELETE string builders, and the bind dispatch
//!   that pairs a staged [`crate::table::Row`] with its placeholders.
//! - `session`: the [`Session`] facade callers hold.
//!
//! The layer is deliberately mechanical; everything non-trivial lives in
//! the table model and the materializer.

mod builder;
mod connection;
#[allow(clippy::module_inception)]
mod session;

pub use builder::{
    bind_row, bind_text_args, build_delete, build_insert, build_select, build_update, Query,
};
pub use connection::{count_parameters, Connection, Statement};
pub use session::Session;
