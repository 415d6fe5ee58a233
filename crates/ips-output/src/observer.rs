//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use ips_core::Tick;
use ips_heatmap::HeatmapGrid;
use ips_sensor::Record;
use ips_sim::{Row, SimObserver};
use tracing::info;

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult, TableRow};

/// A [`SimObserver`] that streams every row to an [`OutputWriter`] backend
/// as the run produces it.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:       W,
    rows_written: u64,
    last_error:   Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            rows_written: 0,
            last_error:   None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Flush the writer.  Needed after a partial run driven by
    /// `Sim::step` / `Sim::steps`, where `on_run_end` never fires.
    pub fn finish(&mut self) -> OutputResult<()> {
        self.writer.finish()
    }

    /// Unwrap the inner writer (e.g. to inspect output after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<R: Record, W: OutputWriter> SimObserver<R> for SimOutputObserver<W> {
    fn on_row(&mut self, row: &Row<R>) {
        let result = self.writer.write_row(&TableRow::from(row));
        if result.is_ok() {
            self.rows_written += 1;
        }
        self.store_err(result);
    }

    fn on_run_end(&mut self, final_tick: Tick, _heatmap: Option<&HeatmapGrid>) {
        let result = self.writer.finish();
        self.store_err(result);
        info!(%final_tick, rows = self.rows_written, "table output finished");
    }
}
