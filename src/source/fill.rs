//! # Result Materialization
//!
//! `fill_table` drains a [`RowCursor`] into a [`DataTable`]: one row per
//! produced record, each cell forwarded by the source's type tag through
//! the table's put* gateway, which locks column types as they are first
//! observed.
//!
//! ## Termination
//!
//! The fill loop is not resumable. It stops on the first of:
//!
//! - cursor exhaustion (`Complete`),
//! - a busy/locked store (`SourceBusy`, no retry),
//! - a store error (`SourceError`),
//! - a rejected cell write, either a type-lock violation or an invalid
//!   buffer (`WriteError`); the record's remaining columns are skipped
//!   and the cursor is not advanced again.
//!
//! In every case the table retains the rows filled so far, and the
//! outcome carries the added-row count alongside the termination state,
//! so callers can tell an empty result from an aborted one.

use super::{RowCursor, StepResult};
use crate::table::DataTable;
use crate::types::DataType;

/// How a fill loop terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillEnd {
    /// Cursor exhausted normally.
    Complete,
    /// The store reported busy/locked; aborted without retry.
    SourceBusy,
    /// The store reported an error.
    SourceError,
    /// A cell write was rejected; the last counted row may be partial.
    WriteError,
}

/// Result of a fill loop: rows added plus the termination state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillOutcome {
    pub rows_added: usize,
    pub end: FillEnd,
}

impl FillOutcome {
    pub fn is_complete(&self) -> bool {
        self.end == FillEnd::Complete
    }
}

/// Drains `source` into `table`, one row per record.
///
/// On the first produced record the table's column count is set from the
/// cursor (a no-op on pre-sized tables, where the one-shot setter simply
/// declines). Records are appended as fresh row slots and filled column
/// by column; the put* gateway propagates each observed type into the
/// table's column locks.
pub fn fill_table<S: RowCursor>(source: &mut S, table: &mut DataTable) -> FillOutcome {
    let column_count = source.column_count();
    let mut rows_added = 0usize;

    loop {
        match source.step() {
            StepResult::Row => {
                if rows_added == 0 {
                    table.set_column_count(column_count);
                }

                table.add_row();
                let row = table.row_count() - 1;

                let mut wrote = true;
                for column in 0..column_count {
                    wrote = match source.column_type(column) {
                        DataType::Integer => {
                            table.put_long(row, column, source.column_long(column))
                        }
                        DataType::Float => {
                            table.put_double(row, column, source.column_double(column))
                        }
                        DataType::String => {
                            let text = source.column_text(column);
                            table.put_string(row, column, text, text.len() + 1)
                        }
                        DataType::Blob => table.put_blob(row, column, source.column_blob(column)),
                        DataType::Null => table.put_null(row, column),
                    };
                    if !wrote {
                        break;
                    }
                }

                rows_added += 1;
                if !wrote {
                    return FillOutcome {
                        rows_added,
                        end: FillEnd::WriteError,
                    };
                }
            }
            StepResult::Done => {
                return FillOutcome {
                    rows_added,
                    end: FillEnd::Complete,
                }
            }
            StepResult::Busy => {
                return FillOutcome {
                    rows_added,
                    end: FillEnd::SourceBusy,
                }
            }
            StepResult::Error => {
                return FillOutcome {
                    rows_added,
                    end: FillEnd::SourceError,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    enum TestValue {
        Null,
        Int(i64),
        Float(f64),
        Text(&'static str),
        Blob(&'static [u8]),
    }

    struct TestCursor {
        records: Vec<Vec<TestValue>>,
        columns: usize,
        position: usize,
        /// What to report once the scripted records run out.
        tail: StepResult,
    }

    impl TestCursor {
        fn new(columns: usize, records: Vec<Vec<TestValue>>) -> Self {
            Self {
                records,
                columns,
                position: 0,
                tail: StepResult::Done,
            }
        }

        fn with_tail(mut self, tail: StepResult) -> Self {
            self.tail = tail;
            self
        }

        fn current(&self, index: usize) -> &TestValue {
            &self.records[self.position - 1][index]
        }
    }

    impl RowCursor for TestCursor {
        fn column_count(&self) -> usize {
            self.columns
        }

        fn step(&mut self) -> StepResult {
            if self.position < self.records.len() {
                self.position += 1;
                StepResult::Row
            } else {
                self.tail
            }
        }

        fn column_type(&self, index: usize) -> DataType {
            match self.current(index) {
                TestValue::Null => DataType::Null,
                TestValue::Int(_) => DataType::Integer,
                TestValue::Float(_) => DataType::Float,
                TestValue::Text(_) => DataType::String,
                TestValue::Blob(_) => DataType::Blob,
            }
        }

        fn column_long(&self, index: usize) -> i64 {
            match self.current(index) {
                TestValue::Int(i) => *i,
                _ => 0,
            }
        }

        fn column_double(&self, index: usize) -> f64 {
            match self.current(index) {
                TestValue::Float(f) => *f,
                _ => 0.0,
            }
        }

        fn column_text(&self, index: usize) -> &[u8] {
            match self.current(index) {
                TestValue::Text(s) => s.as_bytes(),
                _ => &[],
            }
        }

        fn column_blob(&self, index: usize) -> &[u8] {
            match self.current(index) {
                TestValue::Blob(b) => b,
                _ => &[],
            }
        }
    }

    #[test]
    fn fills_typed_record() {
        let mut source = TestCursor::new(
            3,
            vec![vec![
                TestValue::Int(1),
                TestValue::Text("Joy"),
                TestValue::Float(30.0),
            ]],
        );
        let mut table = DataTable::new(0);

        let outcome = fill_table(&mut source, &mut table);
        assert_eq!(outcome.rows_added, 1);
        assert!(outcome.is_complete());

        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.column_type(0), DataType::Integer);
        assert_eq!(table.column_type(1), DataType::String);
        assert_eq!(table.column_type(2), DataType::Float);
        assert_eq!(table.get_long(0, 0), 1);
        assert_eq!(table.get_string(0, 1), Some(&b"Joy"[..]));
        assert_eq!(table.get_double(0, 2), 30.0);
    }

    #[test]
    fn empty_cursor_completes_with_zero_rows() {
        let mut source = TestCursor::new(2, vec![]);
        let mut table = DataTable::new(0);

        let outcome = fill_table(&mut source, &mut table);
        assert_eq!(outcome.rows_added, 0);
        assert_eq!(outcome.end, FillEnd::Complete);
        assert_eq!(table.row_count(), 0);
        // no record ever arrived, so the column count was never set
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn source_error_keeps_rows_filled_so_far() {
        let mut source = TestCursor::new(
            1,
            vec![vec![TestValue::Int(1)], vec![TestValue::Int(2)]],
        )
        .with_tail(StepResult::Error);
        let mut table = DataTable::new(0);

        let outcome = fill_table(&mut source, &mut table);
        assert_eq!(outcome.rows_added, 2);
        assert_eq!(outcome.end, FillEnd::SourceError);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get_long(0, 0), 1);
        assert_eq!(table.get_long(1, 0), 2);
    }

    #[test]
    fn busy_aborts_without_retry() {
        let mut source =
            TestCursor::new(1, vec![vec![TestValue::Int(7)]]).with_tail(StepResult::Busy);
        let mut table = DataTable::new(0);

        let outcome = fill_table(&mut source, &mut table);
        assert_eq!(outcome.rows_added, 1);
        assert_eq!(outcome.end, FillEnd::SourceBusy);
    }

    #[test]
    fn type_lock_violation_stops_the_fill() {
        // second record flips the column to Float after Integer locked it
        let mut source = TestCursor::new(
            2,
            vec![
                vec![TestValue::Int(1), TestValue::Int(10)],
                vec![TestValue::Float(2.0), TestValue::Int(20)],
            ],
        );
        let mut table = DataTable::new(0);

        let outcome = fill_table(&mut source, &mut table);
        assert_eq!(outcome.end, FillEnd::WriteError);
        assert_eq!(outcome.rows_added, 2);

        // first row intact; aborted row's remaining column never written
        assert_eq!(table.get_long(0, 0), 1);
        assert_eq!(table.get_long(0, 1), 10);
        assert_eq!(table.data_type(1, 0), DataType::Null);
        assert_eq!(table.data_type(1, 1), DataType::Null);
    }

    #[test]
    fn null_columns_do_not_lock_types() {
        let mut source = TestCursor::new(
            1,
            vec![
                vec![TestValue::Null],
                vec![TestValue::Text("late")],
            ],
        );
        let mut table = DataTable::new(0);

        let outcome = fill_table(&mut source, &mut table);
        assert!(outcome.is_complete());
        assert_eq!(table.column_type(0), DataType::String);
        assert_eq!(table.data_type(0, 0), DataType::Null);
        assert_eq!(table.get_string(1, 0), Some(&b"late"[..]));
    }

    #[test]
    fn blob_record_roundtrips() {
        let mut source = TestCursor::new(1, vec![vec![TestValue::Blob(&[0xAB, 0xCD])]]);
        let mut table = DataTable::new(0);

        let outcome = fill_table(&mut source, &mut table);
        assert!(outcome.is_complete());
        assert_eq!(table.column_type(0), DataType::Blob);
        assert_eq!(table.get_blob(0, 0), Some(&[0xAB, 0xCD][..]));
    }
}
