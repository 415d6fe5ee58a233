//! The `OutputWriter` trait implemented by all backend writers.

use crate::{OutputResult, TableRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// The column schema is fixed when the writer is created; a row with a
/// different field count is rejected with
/// [`OutputError::SchemaMismatch`][crate::OutputError::SchemaMismatch].
pub trait OutputWriter {
    /// Append one row.
    fn write_row(&mut self, row: &TableRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent. Safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
