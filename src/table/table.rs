//! # Result Table
//!
//! `DataTable` is a dynamically growable sequence of row slots sharing one
//! column count, plus one type lock per column. It is the unit of result
//! ownership handed across the materialization boundary, and the staging
//! structure for multi-row writes.
//!
//! ## Row Slots
//!
//! Row slots are nullable: growing the table appends empty slots, and a
//! slot's `Row` is allocated on the first write to any of its columns.
//! Every read treats an unallocated slot exactly like an all-Null row.
//!
//! ## Column Type Locks
//!
//! The first typed write to a column locks that column's type; later
//! writes to the same column on any row must use the same type or they
//! are rejected. Null writes always pass and never change the lock. The
//! locks are maintained by the put* gateway and are never exposed for
//! direct mutation.

use smallvec::SmallVec;

use super::Row;
use crate::types::DataType;

/// Growable table of optional rows with per-column type locks.
///
/// Deliberately not `Clone`: a table is the single owner of its rows.
#[derive(Debug, Default)]
pub struct DataTable {
    rows: Vec<Option<Row>>,
    column_count: usize,
    column_types: SmallVec<[DataType; 16]>,
}

impl DataTable {
    /// Creates an empty table with `column_count` columns (possibly zero,
    /// to be fixed later via `set_column_count`).
    pub fn new(column_count: usize) -> Self {
        Self::with_rows(0, column_count)
    }

    /// Creates a table pre-sized to `row_count` empty slots.
    pub fn with_rows(row_count: usize, column_count: usize) -> Self {
        Self {
            rows: vec![None; row_count],
            column_count,
            column_types: SmallVec::from_elem(DataType::Null, column_count),
        }
    }

    /// One-shot column count assignment. Fails once the count is positive.
    pub fn set_column_count(&mut self, column_count: usize) -> bool {
        if self.column_count > 0 {
            return false;
        }

        self.column_count = column_count;
        self.column_types = SmallVec::from_elem(DataType::Null, column_count);
        true
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Resizes the slot sequence. Shrinking drops and releases trailing
    /// rows; growing appends empty slots.
    pub fn set_row_count(&mut self, row_count: usize) -> bool {
        self.rows.resize(row_count, None);
        true
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Appends one empty row slot.
    pub fn add_row(&mut self) {
        self.rows.push(None);
    }

    /// One-shot explicit lock assignment for a column. Fails when the
    /// column is out of range or already locked to a non-Null type.
    pub fn set_column_type(&mut self, column: usize, data_type: DataType) -> bool {
        match self.column_types.get_mut(column) {
            Some(slot) if *slot == DataType::Null => {
                *slot = data_type;
                true
            }
            _ => false,
        }
    }

    /// Returns the column's locked type, or Null when unlocked, out of
    /// range, or after `reset`.
    pub fn column_type(&self, column: usize) -> DataType {
        self.column_types
            .get(column)
            .copied()
            .unwrap_or(DataType::Null)
    }

    /// Drops all rows and releases the column-type array. The column count
    /// itself is retained, so `set_column_count` stays one-shot.
    pub fn reset(&mut self) -> bool {
        self.rows.clear();
        self.column_types = SmallVec::new();
        true
    }

    /// Shared put* gateway: bounds check, type-lock check, lazy row slot
    /// allocation, delegated write, then lock propagation on success.
    fn put_cell(
        &mut self,
        row: usize,
        column: usize,
        data_type: DataType,
        write: impl FnOnce(&mut Row, usize) -> bool,
    ) -> bool {
        if row >= self.rows.len() || column >= self.column_count {
            return false;
        }

        if data_type != DataType::Null {
            let locked = self.column_type(column);
            if locked != DataType::Null && locked != data_type {
                return false;
            }
        }

        let width = self.column_count;
        let slot = self.rows[row].get_or_insert_with(|| Row::new(width));
        if !write(slot, column) {
            return false;
        }

        if data_type != DataType::Null {
            if let Some(lock) = self.column_types.get_mut(column) {
                if *lock == DataType::Null {
                    *lock = data_type;
                }
            }
        }

        true
    }

    pub fn put_null(&mut self, row: usize, column: usize) -> bool {
        self.put_cell(row, column, DataType::Null, |r, c| r.put_null(c, None))
    }

    pub fn put_long(&mut self, row: usize, column: usize, value: i64) -> bool {
        self.put_cell(row, column, DataType::Integer, |r, c| {
            r.put_long(c, value, None)
        })
    }

    pub fn put_double(&mut self, row: usize, column: usize, value: f64) -> bool {
        self.put_cell(row, column, DataType::Float, |r, c| {
            r.put_double(c, value, None)
        })
    }

    pub fn put_string(&mut self, row: usize, column: usize, value: &[u8], length: usize) -> bool {
        if length == 0 {
            return false;
        }
        self.put_cell(row, column, DataType::String, |r, c| {
            r.put_string(c, value, length, None)
        })
    }

    pub fn put_blob(&mut self, row: usize, column: usize, value: &[u8]) -> bool {
        if value.is_empty() {
            return false;
        }
        self.put_cell(row, column, DataType::Blob, |r, c| r.put_blob(c, value, None))
    }

    fn row_at(&self, row: usize, column: usize) -> Option<&Row> {
        if row >= self.rows.len() || column >= self.column_count {
            return None;
        }
        self.rows[row].as_ref()
    }

    /// Returns the stored cell's type, treating unallocated slots as
    /// all-Null rows.
    pub fn data_type(&self, row: usize, column: usize) -> DataType {
        self.row_at(row, column)
            .map_or(DataType::Null, |r| r.data_type(column))
    }

    pub fn get_long(&self, row: usize, column: usize) -> i64 {
        self.row_at(row, column).map_or(0, |r| r.get_long(column))
    }

    pub fn get_double(&self, row: usize, column: usize) -> f64 {
        self.row_at(row, column)
            .map_or(0.0, |r| r.get_double(column))
    }

    pub fn get_string(&self, row: usize, column: usize) -> Option<&[u8]> {
        self.row_at(row, column).and_then(|r| r.get_string(column))
    }

    pub fn get_blob(&self, row: usize, column: usize) -> Option<&[u8]> {
        self.row_at(row, column).and_then(|r| r.get_blob(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_count_is_one_shot() {
        let mut table = DataTable::new(0);
        assert!(table.set_column_count(3));
        assert_eq!(table.column_count(), 3);
        assert!(!table.set_column_count(5));
        assert_eq!(table.column_count(), 3);

        let mut sized = DataTable::new(2);
        assert!(!sized.set_column_count(4));
    }

    #[test]
    fn unwritten_slots_read_as_null() {
        let mut table = DataTable::new(4);
        table.set_row_count(5);
        assert_eq!(table.row_count(), 5);

        for row in 0..5 {
            for column in 0..4 {
                assert_eq!(table.data_type(row, column), DataType::Null);
                assert_eq!(table.get_long(row, column), 0);
                assert_eq!(table.get_double(row, column), 0.0);
                assert_eq!(table.get_string(row, column), None);
                assert_eq!(table.get_blob(row, column), None);
            }
        }
    }

    #[test]
    fn row_allocated_on_first_write() {
        let mut table = DataTable::new(2);
        table.add_row();

        assert_eq!(table.data_type(0, 0), DataType::Null);
        assert!(table.put_long(0, 0, 11));
        assert_eq!(table.get_long(0, 0), 11);
        // the sibling column of the now-allocated row still reads Null
        assert_eq!(table.data_type(0, 1), DataType::Null);
    }

    #[test]
    fn first_write_locks_the_column() {
        let mut table = DataTable::new(1);
        table.set_row_count(3);

        assert!(table.put_long(0, 0, 1));
        assert_eq!(table.column_type(0), DataType::Integer);

        assert!(!table.put_double(1, 0, 2.0));
        assert!(!table.put_string(1, 0, b"x", 2));
        assert!(!table.put_blob(1, 0, &[1]));
        assert!(table.put_long(1, 0, 2));

        // the rejected writes left the table untouched
        assert_eq!(table.data_type(1, 0), DataType::Integer);
        assert_eq!(table.get_long(1, 0), 2);
    }

    #[test]
    fn null_writes_bypass_and_preserve_the_lock() {
        let mut table = DataTable::new(1);
        table.set_row_count(2);

        assert!(table.put_null(0, 0));
        assert_eq!(table.column_type(0), DataType::Null);

        assert!(table.put_string(0, 0, b"joy", 4));
        assert_eq!(table.column_type(0), DataType::String);

        assert!(table.put_null(1, 0));
        assert_eq!(table.column_type(0), DataType::String);
    }

    #[test]
    fn explicit_column_type_is_one_shot() {
        let mut table = DataTable::new(2);
        assert!(table.set_column_type(0, DataType::Blob));
        assert!(!table.set_column_type(0, DataType::Integer));
        assert!(!table.set_column_type(2, DataType::Integer));
        assert_eq!(table.column_type(0), DataType::Blob);
        assert_eq!(table.column_type(1), DataType::Null);
        assert_eq!(table.column_type(2), DataType::Null);
    }

    #[test]
    fn out_of_range_writes_fail() {
        let mut table = DataTable::new(1);
        table.add_row();
        assert!(!table.put_long(1, 0, 1));
        assert!(!table.put_long(0, 1, 1));
        assert!(!table.put_string(0, 0, b"x", 0));
        assert!(!table.put_blob(0, 0, &[]));
    }

    #[test]
    fn shrinking_drops_trailing_rows() {
        let mut table = DataTable::new(1);
        table.set_row_count(3);
        table.put_long(2, 0, 3);
        table.set_row_count(2);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get_long(2, 0), 0);
    }

    #[test]
    fn reset_releases_rows_and_locks_but_keeps_width() {
        let mut table = DataTable::new(2);
        table.add_row();
        table.put_long(0, 0, 5);

        assert!(table.reset());
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.column_type(0), DataType::Null);
        assert!(!table.set_column_count(4));
        assert!(!table.set_column_type(0, DataType::Integer));
    }
}
