//! `ips-sensor`: virtual sensors and the records they produce.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`reading`] | `Reading` enum, `RssiReading`, `GyroReading`                      |
//! | [`model`]   | `SensorModel` trait                                               |
//! | [`sensors`] | Rotation, foot traffic, pickup, motion, gyroscope, customer models |
//! | [`rssi`]    | `SensorPlacement`, `get_rssi`, `RssiSensor`                       |
//! | [`record`]  | `Record` trait: fixed column schema per variant                  |
//! | [`suite`]   | `SensorSuite` trait and the three shipped variants                |
//!
//! # Design notes
//!
//! Random sensors are stateless: all entropy comes from the `SensorRng`
//! passed into [`SensorModel::sample`], one stream per sensor slot.  Two
//! sensors therefore never influence each other, and no reading depends on
//! an earlier one.  The RSSI model takes no RNG at all; it is a pure
//! function of placement and target position.

pub mod model;
pub mod reading;
pub mod record;
pub mod rssi;
pub mod sensors;
pub mod suite;


pub use model::SensorModel;
pub use reading::{GyroReading, Reading, RssiReading};
pub use record::Record;
pub use rssi::{get_rssi, RssiSensor, SensorPlacement, NEAR_FIELD_DISTANCE, NOISE_FLOOR_DBM};
pub use sensors::{
    BrowsingTimeSensor, FootTrafficSensor, GyroscopeSensor, MotionSensor, PickupSensor,
    PurchaseSensor, ReturningCustomerSensor, RotationSensor,
};
pub use suite::{
    CustomerRecord, CustomerSuite, SensorSuite, StoreFloorRecord, StoreFloorSuite,
    TrackingRecord, TrackingSuite,
};
