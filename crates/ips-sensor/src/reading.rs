//! Typed sensor readings.

use std::fmt;

/// Output of the RSSI distance model for one target position.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RssiReading {
    /// Signal strength relative to the sensor's range edge, in dBm.
    pub dbm:      f64,
    /// Euclidean distance from the sensor to the target, in grid units.
    pub distance: f64,
}

/// Angular rates around the three body axes, in rad/s.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GyroReading {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// One sensor's output for one step.  Immutable once produced.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Reading {
    /// Heading in degrees, `[0, 360)`.
    Rotation(f64),
    /// People counted this step, `0..=15`.
    FootTraffic(u8),
    ItemPickup(bool),
    Motion(bool),
    Rssi(RssiReading),
    Gyroscope(GyroReading),
    /// Minutes a customer spent browsing, `[0, 15)`.
    BrowsingTime(f64),
    /// Items bought, `0..=5`.
    Purchases(u8),
    ReturningCustomer(bool),
}

impl From<RssiReading> for Reading {
    fn from(r: RssiReading) -> Self {
        Reading::Rssi(r)
    }
}

impl From<GyroReading> for Reading {
    fn from(r: GyroReading) -> Self {
        Reading::Gyroscope(r)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Rotation(deg)        => write!(f, "rotation {deg:.1}°"),
            Reading::FootTraffic(n)       => write!(f, "foot traffic {n}"),
            Reading::ItemPickup(b)        => write!(f, "item pickup {b}"),
            Reading::Motion(b)            => write!(f, "motion {b}"),
            Reading::Rssi(r)              => write!(f, "rssi {:.2} dBm @ {:.2}", r.dbm, r.distance),
            Reading::Gyroscope(g)         => write!(f, "gyro ({:.3}, {:.3}, {:.3})", g.x, g.y, g.z),
            Reading::BrowsingTime(m)      => write!(f, "browsing {m:.1} min"),
            Reading::Purchases(n)         => write!(f, "purchases {n}"),
            Reading::ReturningCustomer(b) => write!(f, "returning {b}"),
        }
    }
}
