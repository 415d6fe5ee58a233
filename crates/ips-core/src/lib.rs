//! `ips-core`: foundational types for the `rust_ips` indoor-positioning
//! simulator.
//!
//! This crate is a dependency of every other `ips-*` crate.  It has no
//! `ips-*` dependencies and minimal external ones (`rand`, `chrono` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                |
//! |-------------|---------------------------------------------------------|
//! | [`ids`]     | `SensorId`                                              |
//! | [`geo`]     | `Coordinates`, `GridSize`, euclidean distance           |
//! | [`time`]    | `Tick`, `TickUnit`, `SimClock`, `SimConfig`             |
//! | [`rng`]     | `SensorRng` (per sensor), `SensorRngs`, `SimRng` (run)  |
//! | [`field`]   | `Column`, `FieldKind`, `Field`: tabular cell model     |
//! | [`error`]   | `IpsError`, `IpsResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to config and geometry.     |

pub mod error;
pub mod field;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{IpsError, IpsResult};
pub use field::{Column, Field, FieldKind};
pub use geo::{Coordinates, GridSize};
pub use ids::SensorId;
pub use rng::{SensorRng, SensorRngs, SimRng};
pub use time::{SimClock, SimConfig, Tick, TickUnit};
