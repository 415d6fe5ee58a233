//! Simulation observer trait for progress reporting and data collection.

use ips_core::{Coordinates, Tick};
use ips_heatmap::HeatmapGrid;
use ips_sensor::Record;
use tracing::{info, warn};

use crate::Row;

/// Callbacks invoked by [`Sim`][crate::Sim] at key points in the step loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: count motion events
///
/// ```rust,ignore
/// struct MotionCounter(usize);
///
/// impl SimObserver<StoreFloorRecord> for MotionCounter {
///     fn on_row(&mut self, row: &Row<StoreFloorRecord>) {
///         if row.record.movement_detected {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SimObserver<R> {
    /// Called at the very start of each step, before any sampling.
    fn on_step_start(&mut self, _tick: Tick) {}

    /// Called when a tracked position was recorded, after the step's row
    /// was stored.  `landed` is `false` if the heatmap dropped it as out of
    /// bounds.
    fn on_position(&mut self, _tick: Tick, _position: Coordinates, _landed: bool) {}

    /// Called once the step's row has been appended to the store.
    fn on_row(&mut self, _row: &Row<R>) {}

    /// Called once after the final step of [`Sim::run`][crate::Sim::run].
    fn on_run_end(&mut self, _final_tick: Tick, _heatmap: Option<&HeatmapGrid>) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl<R> SimObserver<R> for NoopObserver {}

/// Logs progress through `tracing` every `interval` steps.
pub struct LoggingObserver {
    interval: u64,
    rows:     u64,
}

impl LoggingObserver {
    /// `interval` of 0 is treated as 1.
    pub fn new(interval: u64) -> Self {
        Self { interval: interval.max(1), rows: 0 }
    }

    pub fn rows_seen(&self) -> u64 {
        self.rows
    }
}

impl<R: Record> SimObserver<R> for LoggingObserver {
    fn on_row(&mut self, row: &Row<R>) {
        self.rows += 1;
        if self.rows.is_multiple_of(self.interval) {
            info!(tick = %row.tick, rows = self.rows, "simulation progress");
        }
    }

    fn on_run_end(&mut self, final_tick: Tick, heatmap: Option<&HeatmapGrid>) {
        match heatmap {
            Some(grid) => {
                if grid.dropped() > 0 {
                    warn!(dropped = grid.dropped(), "positions fell outside the grid");
                }
                info!(
                    %final_tick,
                    rows = self.rows,
                    samples = grid.total(),
                    peak = grid.max(),
                    "simulation finished"
                );
            }
            None => info!(%final_tick, rows = self.rows, "simulation finished"),
        }
    }
}
