//! # Value Type Tags
//!
//! This module provides the canonical `DataType` enum for rowgrid, used by
//! cells, column type locks, and the cursor contract.
//!
//! ## Type Categories
//!
//! | Tag | Payload | Storage |
//! |---------|-----------------|------------------|
//! | Null | none | - |
//! | Integer | i64 | inline |
//! | Float | f64 | inline |
//! | String | bytes + length | owned heap buffer |
//! | Blob | bytes + size | owned heap buffer |
//!
//! ## Discriminant Values
//!
//! The `#[repr(u8)]` discriminants match the tags the dynamic-typed store
//! reports for result columns, so a cursor's type tag maps onto `DataType`
//! without translation.

/// Type tag for a single cell value.
///
/// Uses `#[repr(u8)]` so the discriminant matches the store's column type
/// codes.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Null = 0,
    Integer = 1,
    Float = 2,
    String = 3,
    Blob = 4,
}

impl DataType {
    /// Returns true if values of this type carry an owned byte buffer.
    pub fn has_buffer(self) -> bool {
        matches!(self, DataType::String | DataType::Blob)
    }

    /// Returns the tag name for diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Null => "NULL",
            DataType::Integer => "INTEGER",
            DataType::Float => "FLOAT",
            DataType::String => "STRING",
            DataType::Blob => "BLOB",
        }
    }
}
