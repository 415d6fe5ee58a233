//! RSSI distance-to-signal model.
//!
//! A fixed beacon at `position` with detection `range` reports, for a target
//! at euclidean distance `d`:
//!
//! ```text
//! d > range        →  NOISE_FLOOR_DBM (-100)
//! otherwise        →  -10 · log10(max(d, near) / range)
//! ```
//!
//! `near = min(NEAR_FIELD_DISTANCE, range)`.  Clamping to the near field keeps
//! a target standing on the beacon's own cell finite: the result there is the
//! placement's [`ceiling_dbm`][SensorPlacement::ceiling_dbm].  On an integer
//! grid the nearest *other* cell is 1.0 away, so the ceiling is strictly
//! above every other in-range value.

use ips_core::{Coordinates, IpsError, IpsResult};

use crate::RssiReading;

/// Value reported for targets beyond the sensor's range.
pub const NOISE_FLOOR_DBM: f64 = -100.0;

/// Distances below this (grid units) are treated as this distance.
pub const NEAR_FIELD_DISTANCE: f64 = 0.5;

/// Static placement of a beacon.  Read-only for the lifetime of a run.
///
/// Deserialization goes through [`SensorPlacement::new`], so a placement
/// loaded from a file is validated like one built in code.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPlacement"))]
pub struct SensorPlacement {
    position: Coordinates,
    range:    f64,
}

/// Unvalidated placement fields as they appear on the wire.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(not(feature = "serde"), allow(dead_code))]
pub(crate) struct RawPlacement {
    pub(crate) position: Coordinates,
    pub(crate) range:    f64,
}

impl TryFrom<RawPlacement> for SensorPlacement {
    type Error = IpsError;

    fn try_from(raw: RawPlacement) -> IpsResult<Self> {
        Self::new(raw.position, raw.range)
    }
}

impl SensorPlacement {
    /// `range` must be finite and strictly positive.
    pub fn new(position: Coordinates, range: f64) -> IpsResult<Self> {
        if !range.is_finite() || range <= 0.0 {
            return Err(IpsError::Config(format!(
                "sensor range must be finite and > 0, got {range}"
            )));
        }
        Ok(Self { position, range })
    }

    #[inline]
    pub fn position(&self) -> Coordinates {
        self.position
    }

    #[inline]
    pub fn range(&self) -> f64 {
        self.range
    }

    /// Strongest value this placement can report (target on the beacon).
    pub fn ceiling_dbm(&self) -> f64 {
        strength(self.near_field(), self.range)
    }

    #[inline]
    fn near_field(&self) -> f64 {
        NEAR_FIELD_DISTANCE.min(self.range)
    }
}

/// Signal strength of `target` as seen by `sensor`.  Always finite.
pub fn get_rssi(sensor: &SensorPlacement, target: Coordinates) -> f64 {
    let distance = sensor.position.distance(target);
    rssi_at_distance(sensor, distance)
}

fn rssi_at_distance(sensor: &SensorPlacement, distance: f64) -> f64 {
    if distance > sensor.range {
        return NOISE_FLOOR_DBM;
    }
    strength(distance.max(sensor.near_field()), sensor.range)
}

#[inline]
fn strength(distance: f64, range: f64) -> f64 {
    // `+ 0.0` folds the -0.0 produced at distance == range into 0.0.
    -10.0 * (distance / range).log10() + 0.0
}

// ── RssiSensor ────────────────────────────────────────────────────────────────

/// A named beacon.  Deterministic: it takes a position, not an RNG.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RssiSensor {
    pub placement: SensorPlacement,
}

impl RssiSensor {
    pub fn new(placement: SensorPlacement) -> Self {
        Self { placement }
    }

    pub fn name(&self) -> &'static str {
        "rssi"
    }

    /// Signal strength and true distance for a target position.
    pub fn read(&self, target: Coordinates) -> RssiReading {
        let distance = self.placement.position.distance(target);
        RssiReading {
            dbm: rssi_at_distance(&self.placement, distance),
            distance,
        }
    }
}
