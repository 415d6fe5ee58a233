//! The `Record` trait: a fixed, typed row schema per simulation variant.

use std::fmt::Debug;

use ips_core::{Column, Field};

use crate::Reading;

/// One step's readings for a given variant.
///
/// The column set is static for the type, so output backends can write a
/// header before the first row and a misspelt column is a compile error
/// instead of a silently empty cell.
pub trait Record: Clone + Debug {
    /// Column schema, in the order produced by [`fields`][Self::fields].
    const COLUMNS: &'static [Column];

    /// Flatten into one field per column.
    fn fields(&self) -> Vec<Field>;

    /// Sensor-name → reading view of the same data.  Readings that were not
    /// taken this step are omitted.
    fn readings(&self) -> Vec<(&'static str, Reading)>;

    /// Look up a single field by column name.
    fn field(&self, column: &str) -> Option<Field> {
        let idx = Self::COLUMNS.iter().position(|c| c.name == column)?;
        self.fields().get(idx).copied()
    }
}
