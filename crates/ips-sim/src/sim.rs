//! The `Sim` struct and its step loop.

use ips_core::{GridSize, SensorRngs, SimClock, SimConfig, SimRng};
use ips_heatmap::HeatmapGrid;
use ips_sensor::SensorSuite;
use tracing::{debug, info};

use crate::{NoopObserver, Paced, Row, SimBuilder, SimObserver, SimResult, TimeSeriesStore};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The simulation runner.
///
/// `Sim<S>` owns all run state: the clock, the suite and its per-sensor
/// RNG streams, the position stream, the time-series store and (when
/// tracking) the heatmap.  Nothing else writes to the store or the heatmap
/// while the run is in progress; [`finish`][Self::finish] hands both off.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<S: SensorSuite> {
    /// Run configuration (validated by the builder).
    pub config: SimConfig,

    /// Simulation clock. The current tick is the next step to run.
    pub clock: SimClock,

    /// The seed actually used, including one drawn from entropy.
    pub seed: u64,

    /// The sensor variant sampled each step.
    pub suite: S,

    /// Per-sensor deterministic RNGs.
    pub rngs: SensorRngs,

    /// Stream for tracked positions.
    pub position_rng: SimRng,

    /// Monitored area.
    pub grid_size: GridSize,

    /// Rows produced so far.
    pub store: TimeSeriesStore<S::Record>,

    /// Spatial accumulator; `None` when tracking is off.
    pub heatmap: Option<HeatmapGrid>,
}

impl<S: SensorSuite> Sim<S> {
    // ── Public API ────────────────────────────────────────────────────────

    /// `true` once `config.total_steps` rows have been produced.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.clock.current_tick >= self.config.end_tick()
    }

    /// Steps left before the run is complete.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.config.end_tick().0.saturating_sub(self.clock.current_tick.0)
    }

    /// Run every remaining step.
    ///
    /// Calls observer hooks at every step boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver<S::Record>>(&mut self, observer: &mut O) -> SimResult<()> {
        while !self.is_finished() {
            self.process_step(observer)?;
        }
        observer.on_run_end(self.clock.current_tick, self.heatmap.as_ref());
        info!(
            rows = self.store.len(),
            samples = self.heatmap.as_ref().map_or(0, HeatmapGrid::total),
            "run complete"
        );
        Ok(())
    }

    /// Run at most `n` steps from the current position; never past the
    /// configured end.  Returns the number of steps executed.
    pub fn run_steps<O: SimObserver<S::Record>>(
        &mut self,
        n:        u64,
        observer: &mut O,
    ) -> SimResult<u64> {
        let mut done = 0;
        while done < n && self.process_step(observer)?.is_some() {
            done += 1;
        }
        Ok(done)
    }

    /// Produce one row, or `None` once the run is complete.
    pub fn step(&mut self) -> SimResult<Option<&Row<S::Record>>> {
        self.process_step(&mut NoopObserver)
    }

    /// Iterate over the remaining rows.  Dropping the iterator early simply
    /// stops the run between steps.
    pub fn steps(&mut self) -> Steps<'_, S> {
        Steps { sim: self }
    }

    /// Like [`steps`][Self::steps], pausing `config.update_interval_ms`
    /// between rows.
    pub fn live(&mut self) -> Paced<Steps<'_, S>> {
        let interval = self.config.update_interval();
        Paced::new(self.steps(), interval)
    }

    /// Hand off the results of the run (complete or partial).
    pub fn finish(self) -> SimOutput<S::Record> {
        SimOutput {
            store:   self.store,
            heatmap: self.heatmap,
            seed:    self.seed,
        }
    }

    // ── Core step processing ──────────────────────────────────────────────

    fn process_step<O: SimObserver<S::Record>>(
        &mut self,
        observer: &mut O,
    ) -> SimResult<Option<&Row<S::Record>>> {
        if self.is_finished() {
            return Ok(None);
        }
        let now = self.clock.current_tick;
        observer.on_step_start(now);

        // ── Position draw (independent of every sensor stream) ────────────
        let position = self
            .heatmap
            .is_some()
            .then(|| self.position_rng.position(self.grid_size));

        // ── Sensors ───────────────────────────────────────────────────────
        let record = self.suite.sample(&mut self.rngs, position);
        let row = Row {
            tick:           now,
            unix_time_secs: self.clock.current_unix_secs()?,
            record,
        };
        debug!(tick = %now, ts = row.unix_time_secs, ?position, "step");

        // The heatmap only counts steps whose row was stored.
        self.store.push(row)?;
        if let (Some(grid), Some(pos)) = (self.heatmap.as_mut(), position) {
            let landed = grid.add(pos);
            observer.on_position(now, pos, landed);
        }
        self.clock.advance();

        let row = self.store.last();
        if let Some(row) = row {
            observer.on_row(row);
        }
        Ok(row)
    }
}

// ── Steps ─────────────────────────────────────────────────────────────────────

/// Iterator over a run's remaining rows.  See [`Sim::steps`].
pub struct Steps<'a, S: SensorSuite> {
    sim: &'a mut Sim<S>,
}

impl<S: SensorSuite> Iterator for Steps<'_, S> {
    type Item = SimResult<Row<S::Record>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.sim.step() {
            Ok(Some(row)) => Some(Ok(row.clone())),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.sim.remaining() as usize;
        (n, Some(n))
    }
}

// ── SimOutput ─────────────────────────────────────────────────────────────────

/// Read-only results of a run.
#[derive(Clone, Debug)]
pub struct SimOutput<R> {
    pub store:   TimeSeriesStore<R>,
    pub heatmap: Option<HeatmapGrid>,
    pub seed:    u64,
}

/// Build, run to completion, and hand off the results.
pub fn simulate<S: SensorSuite>(config: SimConfig, suite: S) -> SimResult<SimOutput<S::Record>> {
    let mut sim = SimBuilder::new(config, suite).build()?;
    sim.run(&mut NoopObserver)?;
    Ok(sim.finish())
}
