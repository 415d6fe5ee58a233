//! Simulation time model and run configuration.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter, one tick
//! per simulation step.  The mapping to wall-clock time is held in `SimClock`:
//!
//!   wall_time = start_unix_secs + tick * tick_duration_secs
//!
//! Integer ticks keep timestamps exact and strictly increasing for any
//! positive tick duration.  Batch runs tick in minutes; live runs usually
//! tick in seconds (see [`TickUnit`]).

use std::fmt;

use chrono::{DateTime, Utc};

use crate::{GridSize, IpsError, IpsResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter (step index).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── TickUnit ──────────────────────────────────────────────────────────────────

/// Common tick granularities.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TickUnit {
    Seconds,
    Minutes,
}

impl TickUnit {
    #[inline]
    pub fn secs(self) -> u32 {
        match self {
            TickUnit::Seconds => 1,
            TickUnit::Minutes => 60,
        }
    }
}

impl fmt::Display for TickUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TickUnit::Seconds => "seconds",
            TickUnit::Minutes => "minutes",
        })
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and Unix wall-clock seconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Unix timestamp (seconds since epoch) of tick 0.
    pub start_unix_secs: i64,
    /// How many real seconds one tick represents.
    pub tick_duration_secs: u32,
    /// The current tick, advanced by `SimClock::advance()` each step.
    pub current_tick: Tick,
}

impl SimClock {
    /// Create a clock starting at `start_unix_secs` with the given resolution.
    pub fn new(start_unix_secs: i64, tick_duration_secs: u32) -> Self {
        Self {
            start_unix_secs,
            tick_duration_secs,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Current Unix timestamp corresponding to `current_tick`.
    #[inline]
    pub fn current_unix_secs(&self) -> IpsResult<i64> {
        self.unix_secs_at(self.current_tick)
    }

    /// Unix timestamp of an arbitrary tick.  Fails instead of wrapping when
    /// the result does not fit in an `i64`.
    pub fn unix_secs_at(&self, tick: Tick) -> IpsResult<i64> {
        i64::try_from(tick.0)
            .ok()
            .and_then(|t| t.checked_mul(self.tick_duration_secs as i64))
            .and_then(|offset| self.start_unix_secs.checked_add(offset))
            .ok_or_else(|| {
                IpsError::Config(format!(
                    "timestamp of {tick} overflows (start {}, {} s per tick)",
                    self.start_unix_secs, self.tick_duration_secs
                ))
            })
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Upper bound on steps per run, matching the dashboard's step selector.
pub const MAX_STEPS: u64 = 1_000;

/// Top-level simulation configuration.
///
/// Typically built in code or loaded from a JSON file by the application
/// crate (with the `serde` feature), then handed to the simulation builder,
/// which calls [`validate`][Self::validate] before any step runs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Unix timestamp for tick 0.
    pub start_unix_secs: i64,

    /// Seconds per tick.  60 for batch runs, 1 for live runs.
    pub tick_duration_secs: u32,

    /// Number of steps (rows) to simulate.  Must be in `1..=MAX_STEPS`.
    pub total_steps: u64,

    /// Run seed.  `None` draws a fresh seed from OS entropy, so two runs
    /// share shape but not values.
    pub seed: Option<u64>,

    /// Monitored area width, in cells.
    pub grid_width: u32,

    /// Monitored area height, in cells.
    pub grid_height: u32,

    /// Sample one position per step and accumulate it in the heatmap.
    pub track_positions: bool,

    /// Pause between rows when the run is consumed as a live feed.
    pub update_interval_ms: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_unix_secs:    0,
            tick_duration_secs: TickUnit::Minutes.secs(),
            total_steps:        100,
            seed:               None,
            grid_width:         50,
            grid_height:        50,
            track_positions:    true,
            update_interval_ms: None,
        }
    }
}

impl SimConfig {
    /// Check every bound.  Called by the simulation builder so a bad
    /// configuration fails before the first step.
    pub fn validate(&self) -> IpsResult<()> {
        if !(1..=MAX_STEPS).contains(&self.total_steps) {
            return Err(IpsError::Config(format!(
                "total_steps {} outside 1..={MAX_STEPS}",
                self.total_steps
            )));
        }
        if self.tick_duration_secs == 0 {
            return Err(IpsError::Config("tick_duration_secs must be positive".into()));
        }
        self.grid_size()?;
        for secs in [self.start_unix_secs, self.last_unix_secs()?] {
            if DateTime::<Utc>::from_timestamp(secs, 0).is_none() {
                return Err(IpsError::Config(format!(
                    "timestamp {secs} is outside the representable date range"
                )));
            }
        }
        Ok(())
    }

    /// Unix timestamp of the final step.
    pub fn last_unix_secs(&self) -> IpsResult<i64> {
        self.make_clock()
            .unix_secs_at(Tick(self.total_steps.saturating_sub(1)))
    }

    /// The validated grid dimensions.
    pub fn grid_size(&self) -> IpsResult<GridSize> {
        GridSize::new(self.grid_width, self.grid_height)
    }

    /// The tick at which the run ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_steps)
    }

    /// The configured seed, or a fresh one from OS entropy.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_unix_secs, self.tick_duration_secs)
    }

    /// Live-feed pause, if configured.
    pub fn update_interval(&self) -> Option<std::time::Duration> {
        self.update_interval_ms.map(std::time::Duration::from_millis)
    }
}
