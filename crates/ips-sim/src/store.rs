//! Append-only, ordered time-series of rows.

use ips_core::{Column, Field, Tick};
use ips_sensor::Record;

use crate::{SimError, SimResult};

/// One timestamped record for a single simulation step.
#[derive(Clone, Debug, PartialEq)]
pub struct Row<R> {
    pub tick:           Tick,
    /// Wall-clock time of the step, Unix seconds.
    pub unix_time_secs: i64,
    pub record:         R,
}

/// The run's rows in step order.
///
/// `push` only accepts the row for the next tick with a later timestamp, so
/// the store never has gaps, duplicates, or out-of-order rows.
#[derive(Clone, Debug)]
pub struct TimeSeriesStore<R> {
    rows: Vec<Row<R>>,
}

impl<R> Default for TimeSeriesStore<R> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<R: Record> TimeSeriesStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { rows: Vec::with_capacity(capacity) }
    }

    /// Append the row for the next tick.
    pub fn push(&mut self, row: Row<R>) -> SimResult<()> {
        let expected = Tick(self.rows.len() as u64);
        if row.tick != expected {
            return Err(SimError::OutOfOrder { expected, got: row.tick });
        }
        if let Some(last) = self.rows.last() {
            if row.unix_time_secs <= last.unix_time_secs {
                return Err(SimError::NonMonotonic {
                    tick:     row.tick,
                    got:      row.unix_time_secs,
                    previous: last.unix_time_secs,
                });
            }
        }
        self.rows.push(row);
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    pub fn rows(&self) -> &[Row<R>] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row<R>> {
        self.rows.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Row<R>> {
        self.rows.get(index)
    }

    pub fn last(&self) -> Option<&Row<R>> {
        self.rows.last()
    }

    /// Column schema of the stored record type.
    pub fn columns(&self) -> &'static [Column] {
        R::COLUMNS
    }

    /// All values of one column, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<Field>> {
        let idx = R::COLUMNS.iter().position(|c| c.name == name)?;
        Some(self.rows.iter().map(|r| r.record.fields()[idx]).collect())
    }

    pub fn timestamps(&self) -> impl Iterator<Item = i64> + '_ {
        self.rows.iter().map(|r| r.unix_time_secs)
    }
}

impl<'a, R> IntoIterator for &'a TimeSeriesStore<R> {
    type Item = &'a Row<R>;
    type IntoIter = std::slice::Iter<'a, Row<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
