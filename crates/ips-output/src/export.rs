//! Whole-store export.

use ips_sensor::Record;
use ips_sim::TimeSeriesStore;
use tracing::info;

use crate::writer::OutputWriter;
use crate::{OutputResult, TableRow};

/// Write every row of a finished (or partial) run, then finish the writer.
/// Returns the number of rows written.
pub fn export_store<R: Record, W: OutputWriter>(
    store:  &TimeSeriesStore<R>,
    writer: &mut W,
) -> OutputResult<usize> {
    for row in store {
        writer.write_row(&TableRow::from(row))?;
    }
    writer.finish()?;
    info!(rows = store.len(), "exported time series");
    Ok(store.len())
}
