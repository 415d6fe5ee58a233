//! Backend-neutral row written by output writers.

use chrono::{DateTime, SecondsFormat, Utc};
use ips_core::Field;
use ips_sensor::Record;
use ips_sim::Row;

use crate::{OutputError, OutputResult};

/// One flattened step: tick, wall-clock time, and the record's fields in
/// schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub tick:           u64,
    pub unix_time_secs: i64,
    pub fields:         Vec<Field>,
}

impl TableRow {
    /// RFC 3339 UTC rendering of the row's timestamp, e.g.
    /// `2023-11-14T22:13:20Z`.
    pub fn timestamp_rfc3339(&self) -> OutputResult<String> {
        DateTime::<Utc>::from_timestamp(self.unix_time_secs, 0)
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
            .ok_or(OutputError::Timestamp(self.unix_time_secs))
    }
}

impl<R: Record> From<&Row<R>> for TableRow {
    fn from(row: &Row<R>) -> Self {
        Self {
            tick:           row.tick.0,
            unix_time_secs: row.unix_time_secs,
            fields:         row.record.fields(),
        }
    }
}
