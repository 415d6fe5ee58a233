//! Random sensor models.
//!
//! | Sensor                    | Output        | Distribution                 |
//! |---------------------------|---------------|------------------------------|
//! | `RotationSensor`          | `f64` degrees | uniform `[0, 360)`           |
//! | `FootTrafficSensor`       | `u8` count    | uniform integer `0..=15`     |
//! | `PickupSensor`            | `bool`        | Bernoulli(0.5)               |
//! | `MotionSensor`            | `bool`        | Bernoulli(0.5)               |
//! | `GyroscopeSensor`         | `GyroReading` | uniform `[-max, max)` per axis |
//! | `BrowsingTimeSensor`      | `f64` minutes | uniform `[0, 15)`            |
//! | `PurchaseSensor`          | `u8` count    | uniform integer `0..=5`      |
//! | `ReturningCustomerSensor` | `bool`        | Bernoulli(0.5)               |

use ips_core::SensorRng;

use crate::{GyroReading, Reading, SensorModel};

pub const FULL_TURN_DEGREES: f64 = 360.0;
pub const MAX_FOOT_TRAFFIC:  u8  = 15;
pub const MAX_BROWSING_MINUTES: f64 = 15.0;
pub const MAX_PURCHASES:     u8  = 5;

// ── Store-floor sensors ───────────────────────────────────────────────────────

/// Shelf-mounted rotation encoder.
#[derive(Copy, Clone, Debug, Default)]
pub struct RotationSensor;

impl SensorModel for RotationSensor {
    type Output = f64;

    fn name(&self) -> &'static str {
        "rotation"
    }

    fn sample(&self, rng: &mut SensorRng) -> f64 {
        rng.gen_range(0.0..FULL_TURN_DEGREES)
    }

    fn to_reading(&self, value: f64) -> Reading {
        Reading::Rotation(value)
    }
}

/// Entrance people counter.
#[derive(Copy, Clone, Debug, Default)]
pub struct FootTrafficSensor;

impl SensorModel for FootTrafficSensor {
    type Output = u8;

    fn name(&self) -> &'static str {
        "foot_traffic"
    }

    fn sample(&self, rng: &mut SensorRng) -> u8 {
        rng.gen_range(0..=MAX_FOOT_TRAFFIC)
    }

    fn to_reading(&self, value: u8) -> Reading {
        Reading::FootTraffic(value)
    }
}

/// Shelf weight/RFID trigger: was an item picked up this step?
#[derive(Copy, Clone, Debug)]
pub struct PickupSensor {
    name: &'static str,
}

impl PickupSensor {
    /// Store-floor naming (`item_picked_up`).
    pub const SHELF: PickupSensor = PickupSensor { name: "item_picked_up" };
    /// Tracking-rig naming (`rfid_detected`).
    pub const RFID: PickupSensor = PickupSensor { name: "rfid_detected" };
}

impl Default for PickupSensor {
    fn default() -> Self {
        Self::SHELF
    }
}

impl SensorModel for PickupSensor {
    type Output = bool;

    fn name(&self) -> &'static str {
        self.name
    }

    fn sample(&self, rng: &mut SensorRng) -> bool {
        rng.gen_bool(0.5)
    }

    fn to_reading(&self, value: bool) -> Reading {
        Reading::ItemPickup(value)
    }
}

/// PIR or camera motion detector.
#[derive(Copy, Clone, Debug)]
pub struct MotionSensor {
    name: &'static str,
}

impl MotionSensor {
    /// Store-floor naming (`movement_detected`).
    pub const PIR: MotionSensor = MotionSensor { name: "movement_detected" };
    /// Tracking-rig naming (`camera_motion`).
    pub const CAMERA: MotionSensor = MotionSensor { name: "camera_motion" };
}

impl Default for MotionSensor {
    fn default() -> Self {
        Self::PIR
    }
}

impl SensorModel for MotionSensor {
    type Output = bool;

    fn name(&self) -> &'static str {
        self.name
    }

    fn sample(&self, rng: &mut SensorRng) -> bool {
        rng.gen_bool(0.5)
    }

    fn to_reading(&self, value: bool) -> Reading {
        Reading::Motion(value)
    }
}

// ── Tracking-rig sensors ──────────────────────────────────────────────────────

/// Three-axis gyroscope on a tracked cart or badge.
#[derive(Copy, Clone, Debug)]
pub struct GyroscopeSensor {
    /// Largest absolute angular rate per axis, rad/s.
    pub max_rate: f64,
}

impl Default for GyroscopeSensor {
    fn default() -> Self {
        Self { max_rate: 1.0 }
    }
}

impl SensorModel for GyroscopeSensor {
    type Output = GyroReading;

    fn name(&self) -> &'static str {
        "gyroscope"
    }

    fn sample(&self, rng: &mut SensorRng) -> GyroReading {
        let m = self.max_rate.abs();
        if m == 0.0 {
            return GyroReading { x: 0.0, y: 0.0, z: 0.0 };
        }
        GyroReading {
            x: rng.gen_range(-m..m),
            y: rng.gen_range(-m..m),
            z: rng.gen_range(-m..m),
        }
    }

    fn to_reading(&self, value: GyroReading) -> Reading {
        Reading::Gyroscope(value)
    }
}

// ── Customer-behaviour sensors ────────────────────────────────────────────────

/// Dwell time of a customer session.
#[derive(Copy, Clone, Debug, Default)]
pub struct BrowsingTimeSensor;

impl SensorModel for BrowsingTimeSensor {
    type Output = f64;

    fn name(&self) -> &'static str {
        "browsing_time"
    }

    fn sample(&self, rng: &mut SensorRng) -> f64 {
        rng.gen_range(0.0..MAX_BROWSING_MINUTES)
    }

    fn to_reading(&self, value: f64) -> Reading {
        Reading::BrowsingTime(value)
    }
}

/// Point-of-sale purchase counter.
#[derive(Copy, Clone, Debug, Default)]
pub struct PurchaseSensor;

impl SensorModel for PurchaseSensor {
    type Output = u8;

    fn name(&self) -> &'static str {
        "purchases"
    }

    fn sample(&self, rng: &mut SensorRng) -> u8 {
        rng.gen_range(0..=MAX_PURCHASES)
    }

    fn to_reading(&self, value: u8) -> Reading {
        Reading::Purchases(value)
    }
}

/// Loyalty-card check: is this a returning customer?
#[derive(Copy, Clone, Debug, Default)]
pub struct ReturningCustomerSensor;

impl SensorModel for ReturningCustomerSensor {
    type Output = bool;

    fn name(&self) -> &'static str {
        "returning_customer"
    }

    fn sample(&self, rng: &mut SensorRng) -> bool {
        rng.gen_bool(0.5)
    }

    fn to_reading(&self, value: bool) -> Reading {
        Reading::ReturningCustomer(value)
    }
}
