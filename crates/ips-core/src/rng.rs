//! Deterministic per-sensor and run-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each sensor in a suite gets its own independent `SmallRng` seeded by:
//!
//!   seed = run_seed XOR (sensor_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive sensor IDs uniformly across the seed space.
//! This means:
//!
//! - Sensors never share RNG state, so no reading depends on another
//!   sensor's draws.
//! - Adding a sensor at the end of a suite does not disturb the streams of
//!   existing sensors.
//! - The run seed is the only input needed to replay a run exactly.
//!
//! Runs configured without a seed draw one from OS entropy (see
//! [`SimConfig::resolve_seed`][crate::SimConfig::resolve_seed]) and report it.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{Coordinates, GridSize, SensorId};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── SensorRng ─────────────────────────────────────────────────────────────────

/// Per-sensor deterministic RNG.
///
/// Created once per sensor when the simulation is built and held in a
/// [`SensorRngs`] alongside the suite.
pub struct SensorRng(SmallRng);

impl SensorRng {
    /// Seed deterministically from the run seed and a sensor slot.
    pub fn new(run_seed: u64, sensor: SensorId) -> Self {
        let seed = run_seed ^ (sensor.0 as u64).wrapping_mul(MIXING_CONSTANT);
        SensorRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}

// ── SensorRngs ────────────────────────────────────────────────────────────────

/// One [`SensorRng`] per sensor slot, kept apart from the suite itself so the
/// engine can borrow the suite immutably while handing out `&mut` streams.
pub struct SensorRngs {
    pub inner: Vec<SensorRng>,
}

impl SensorRngs {
    /// Allocate and seed `count` per-sensor RNGs from `run_seed`.
    pub fn new(count: usize, run_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| SensorRng::new(run_seed, SensorId(i)))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one sensor's RNG.
    ///
    /// # Panics
    /// Panics if `sensor` is not a slot of this set; suites size their
    /// `SensorRngs` from their own sensor list, so this is a wiring bug.
    #[inline]
    pub fn get_mut(&mut self, sensor: SensorId) -> &mut SensorRng {
        &mut self.inner[sensor.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Run-level RNG for draws that belong to no sensor (tracked positions).
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Uniform position in `[0, width) × [0, height)`.
    #[inline]
    pub fn position(&mut self, size: GridSize) -> Coordinates {
        let x = self.0.gen_range(0..size.width) as i32;
        let y = self.0.gen_range(0..size.height) as i32;
        Coordinates::new(x, y)
    }
}
