//! Sensor suites: the fixed set of sensors sampled once per step, and the
//! record each suite produces.
//!
//! | Suite             | Columns                                                             |
//! |-------------------|---------------------------------------------------------------------|
//! | `StoreFloorSuite` | rotation, foot_traffic, item_picked_up, movement_detected           |
//! | `TrackingSuite`   | gyroscope_x/y/z, rfid_detected, camera_motion, position_x/y, rssi_* |
//! | `CustomerSuite`   | browsing_time, purchases, returning_customer                        |

use ips_core::{Column, Coordinates, Field, GridSize, IpsResult, SensorId, SensorRngs};

use crate::sensors::{
    BrowsingTimeSensor, FootTrafficSensor, GyroscopeSensor, MotionSensor, PickupSensor,
    PurchaseSensor, ReturningCustomerSensor, RotationSensor,
};
use crate::{GyroReading, Reading, Record, RssiReading, RssiSensor, SensorModel, SensorPlacement};

/// A fixed set of sensors sampled together each step.
///
/// Suites hold only configuration; randomness is supplied through
/// `SensorRngs` sized by [`sensor_count`][Self::sensor_count], one stream
/// per random sensor.
pub trait SensorSuite {
    type Record: Record;

    /// Short variant name for logs.
    fn name(&self) -> &'static str;

    /// Number of RNG streams the suite needs.
    fn sensor_count(&self) -> usize;

    /// Sample every sensor exactly once.  `position` is the step's tracked
    /// position, `None` when spatial tracking is off.
    fn sample(&self, rngs: &mut SensorRngs, position: Option<Coordinates>) -> Self::Record;
}

// ── Store floor ───────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StoreFloorRecord {
    pub rotation:          f64,
    pub foot_traffic:      u8,
    pub item_picked_up:    bool,
    pub movement_detected: bool,
}

impl Record for StoreFloorRecord {
    const COLUMNS: &'static [Column] = &[
        Column::float("rotation"),
        Column::integer("foot_traffic"),
        Column::boolean("item_picked_up"),
        Column::boolean("movement_detected"),
    ];

    fn fields(&self) -> Vec<Field> {
        vec![
            self.rotation.into(),
            self.foot_traffic.into(),
            self.item_picked_up.into(),
            self.movement_detected.into(),
        ]
    }

    fn readings(&self) -> Vec<(&'static str, Reading)> {
        vec![
            ("rotation", Reading::Rotation(self.rotation)),
            ("foot_traffic", Reading::FootTraffic(self.foot_traffic)),
            ("item_picked_up", Reading::ItemPickup(self.item_picked_up)),
            ("movement_detected", Reading::Motion(self.movement_detected)),
        ]
    }
}

/// Shelf rotation, entrance counter, pickup trigger and PIR motion.
#[derive(Clone, Debug, Default)]
pub struct StoreFloorSuite {
    pub rotation:     RotationSensor,
    pub foot_traffic: FootTrafficSensor,
    pub pickup:       PickupSensor,
    pub motion:       MotionSensor,
}

impl StoreFloorSuite {
    const ROTATION: SensorId = SensorId(0);
    const FOOT:     SensorId = SensorId(1);
    const PICKUP:   SensorId = SensorId(2);
    const MOTION:   SensorId = SensorId(3);
}

impl SensorSuite for StoreFloorSuite {
    type Record = StoreFloorRecord;

    fn name(&self) -> &'static str {
        "store_floor"
    }

    fn sensor_count(&self) -> usize {
        4
    }

    fn sample(&self, rngs: &mut SensorRngs, _position: Option<Coordinates>) -> StoreFloorRecord {
        StoreFloorRecord {
            rotation:          self.rotation.sample(rngs.get_mut(Self::ROTATION)),
            foot_traffic:      self.foot_traffic.sample(rngs.get_mut(Self::FOOT)),
            item_picked_up:    self.pickup.sample(rngs.get_mut(Self::PICKUP)),
            movement_detected: self.motion.sample(rngs.get_mut(Self::MOTION)),
        }
    }
}

// ── Tracking rig ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrackingRecord {
    pub gyroscope:     GyroReading,
    pub rfid_detected: bool,
    pub camera_motion: bool,
    /// The step's tracked position, if tracking is on.
    pub position:      Option<Coordinates>,
    /// Beacon reading for `position`, if the suite has a beacon.
    pub rssi:          Option<RssiReading>,
}

impl Record for TrackingRecord {
    const COLUMNS: &'static [Column] = &[
        Column::float("gyroscope_x"),
        Column::float("gyroscope_y"),
        Column::float("gyroscope_z"),
        Column::boolean("rfid_detected"),
        Column::boolean("camera_motion"),
        Column::integer("position_x"),
        Column::integer("position_y"),
        Column::float("rssi_dbm"),
        Column::float("rssi_distance"),
    ];

    fn fields(&self) -> Vec<Field> {
        vec![
            self.gyroscope.x.into(),
            self.gyroscope.y.into(),
            self.gyroscope.z.into(),
            self.rfid_detected.into(),
            self.camera_motion.into(),
            self.position.map(|p| p.x).into(),
            self.position.map(|p| p.y).into(),
            self.rssi.map(|r| r.dbm).into(),
            self.rssi.map(|r| r.distance).into(),
        ]
    }

    fn readings(&self) -> Vec<(&'static str, Reading)> {
        let mut out = vec![
            ("gyroscope", Reading::Gyroscope(self.gyroscope)),
            ("rfid_detected", Reading::ItemPickup(self.rfid_detected)),
            ("camera_motion", Reading::Motion(self.camera_motion)),
        ];
        if let Some(r) = self.rssi {
            out.push(("rssi", Reading::Rssi(r)));
        }
        out
    }
}

/// Gyroscope badge, RFID gate and camera, plus an optional RSSI beacon that
/// reads the tracked position.
#[derive(Clone, Debug)]
pub struct TrackingSuite {
    pub gyroscope: GyroscopeSensor,
    pub rfid:      PickupSensor,
    pub camera:    MotionSensor,
    pub beacon:    Option<RssiSensor>,
}

impl TrackingSuite {
    const GYRO:   SensorId = SensorId(0);
    const RFID:   SensorId = SensorId(1);
    const CAMERA: SensorId = SensorId(2);

    /// Suite without a beacon.
    pub fn new() -> Self {
        Self {
            gyroscope: GyroscopeSensor::default(),
            rfid:      PickupSensor::RFID,
            camera:    MotionSensor::CAMERA,
            beacon:    None,
        }
    }

    pub fn with_beacon(mut self, placement: SensorPlacement) -> Self {
        self.beacon = Some(RssiSensor::new(placement));
        self
    }

    /// Suite with one beacon at the grid centre whose range reaches every
    /// corner.
    pub fn for_grid(size: GridSize) -> IpsResult<Self> {
        let placement = SensorPlacement::new(size.center(), size.half_diagonal())?;
        Ok(Self::new().with_beacon(placement))
    }
}

impl Default for TrackingSuite {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorSuite for TrackingSuite {
    type Record = TrackingRecord;

    fn name(&self) -> &'static str {
        "tracking"
    }

    fn sensor_count(&self) -> usize {
        3
    }

    fn sample(&self, rngs: &mut SensorRngs, position: Option<Coordinates>) -> TrackingRecord {
        let rssi = match (self.beacon, position) {
            (Some(beacon), Some(pos)) => Some(beacon.read(pos)),
            _ => None,
        };
        TrackingRecord {
            gyroscope:     self.gyroscope.sample(rngs.get_mut(Self::GYRO)),
            rfid_detected: self.rfid.sample(rngs.get_mut(Self::RFID)),
            camera_motion: self.camera.sample(rngs.get_mut(Self::CAMERA)),
            position,
            rssi,
        }
    }
}

// ── Customer behaviour ────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CustomerRecord {
    pub browsing_time:      f64,
    pub purchases:          u8,
    pub returning_customer: bool,
}

impl Record for CustomerRecord {
    const COLUMNS: &'static [Column] = &[
        Column::float("browsing_time"),
        Column::integer("purchases"),
        Column::boolean("returning_customer"),
    ];

    fn fields(&self) -> Vec<Field> {
        vec![
            self.browsing_time.into(),
            self.purchases.into(),
            self.returning_customer.into(),
        ]
    }

    fn readings(&self) -> Vec<(&'static str, Reading)> {
        vec![
            ("browsing_time", Reading::BrowsingTime(self.browsing_time)),
            ("purchases", Reading::Purchases(self.purchases)),
            ("returning_customer", Reading::ReturningCustomer(self.returning_customer)),
        ]
    }
}

/// Session dwell time, purchase count and loyalty flag.
#[derive(Clone, Debug, Default)]
pub struct CustomerSuite {
    pub browsing:  BrowsingTimeSensor,
    pub purchases: PurchaseSensor,
    pub returning: ReturningCustomerSensor,
}

impl CustomerSuite {
    const BROWSING:  SensorId = SensorId(0);
    const PURCHASES: SensorId = SensorId(1);
    const RETURNING: SensorId = SensorId(2);
}

impl SensorSuite for CustomerSuite {
    type Record = CustomerRecord;

    fn name(&self) -> &'static str {
        "customer"
    }

    fn sensor_count(&self) -> usize {
        3
    }

    fn sample(&self, rngs: &mut SensorRngs, _position: Option<Coordinates>) -> CustomerRecord {
        CustomerRecord {
            browsing_time:      self.browsing.sample(rngs.get_mut(Self::BROWSING)),
            purchases:          self.purchases.sample(rngs.get_mut(Self::PURCHASES)),
            returning_customer: self.returning.sample(rngs.get_mut(Self::RETURNING)),
        }
    }
}
