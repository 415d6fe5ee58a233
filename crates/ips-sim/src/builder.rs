//! Fluent builder for constructing a [`Sim`].

use ips_core::{SensorRngs, SimConfig, SimRng};
use ips_heatmap::HeatmapGrid;
use ips_sensor::SensorSuite;
use tracing::info;

use crate::{Sim, SimError, SimResult, TimeSeriesStore};

/// Offset mixed into the run seed for the position stream, so positions
/// never share a stream with sensor slot 0.
const POSITION_STREAM: u64 = 0xA11CE;

/// Fluent builder for [`Sim<S>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: step count, tick duration, grid, seed, …
/// - `S: SensorSuite`: the sensor variant to sample each step
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                                        |
/// |-------------------|------------------------------------------------|
/// | `.seed(s)`        | `config.seed`, else OS entropy                  |
/// | `.sensor_rngs(r)` | One stream per sensor, derived from the seed   |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, TrackingSuite::for_grid(size)?)
///     .seed(42)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<S: SensorSuite> {
    config: SimConfig,
    suite:  S,
    rngs:   Option<SensorRngs>,
}

impl<S: SensorSuite> SimBuilder<S> {
    pub fn new(config: SimConfig, suite: S) -> Self {
        Self { config, suite, rngs: None }
    }

    /// Fix the run seed, overriding `config.seed`.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Supply pre-built per-sensor RNG streams.  Must hold exactly
    /// `suite.sensor_count()` streams.
    pub fn sensor_rngs(mut self, rngs: SensorRngs) -> Self {
        self.rngs = Some(rngs);
        self
    }

    /// Validate inputs and return a ready-to-run [`Sim`].  Nothing is
    /// sampled before validation succeeds.
    pub fn build(self) -> SimResult<Sim<S>> {
        self.config.validate()?;
        let grid_size = self.config.grid_size()?;
        let seed = self.config.resolve_seed();

        let expected = self.suite.sensor_count();
        let rngs = match self.rngs {
            Some(r) => {
                if r.len() != expected {
                    return Err(SimError::SensorCountMismatch { expected, got: r.len() });
                }
                r
            }
            None => SensorRngs::new(expected, seed),
        };

        let position_rng = SimRng::new(seed).child(POSITION_STREAM);
        let heatmap = self
            .config
            .track_positions
            .then(|| HeatmapGrid::new(grid_size));

        info!(
            suite = self.suite.name(),
            steps = self.config.total_steps,
            tick_secs = self.config.tick_duration_secs,
            seed,
            grid = %grid_size,
            tracking = self.config.track_positions,
            "simulation built"
        );

        Ok(Sim {
            clock: self.config.make_clock(),
            store: TimeSeriesStore::with_capacity(self.config.total_steps as usize),
            config: self.config,
            seed,
            suite: self.suite,
            rngs,
            position_rng,
            grid_size,
            heatmap,
        })
    }
}
