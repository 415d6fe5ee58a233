//! `ips-sim`: step loop orchestrator for the rust_ips simulator.
//!
//! # Step loop
//!
//! ```text
//! for tick in 0..config.total_steps:
//!   ① Position : if tracking, draw a uniform cell.
//!   ② Sample   : every sensor of the suite is sampled exactly once.
//!   ③ Stamp    : timestamp = start + tick * tick_duration.
//!   ④ Append   : the row goes to the TimeSeriesStore, then the position
//!                goes to the heatmap; observers are told.
//! ```
//!
//! The loop can be driven three ways: [`Sim::run`] to completion,
//! [`Sim::step`] one row at a time, or [`Sim::steps`] / [`Sim::live`] as an
//! iterator.  Stopping early, or a step failing, always leaves the store
//! and heatmap holding exactly the completed steps.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ips_core::SimConfig;
//! use ips_sensor::StoreFloorSuite;
//! use ips_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), StoreFloorSuite::default()).build()?;
//! sim.run(&mut NoopObserver)?;
//! let out = sim.finish();
//! ```

pub mod builder;
pub mod error;
pub mod live;
pub mod observer;
pub mod sim;
pub mod stats;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use live::{Paced, StopHandle};
pub use observer::{LoggingObserver, NoopObserver, SimObserver};
pub use sim::{simulate, Sim, SimOutput, Steps};
pub use stats::{correlation, describe, rows_where, ColumnSummary, CorrelationMatrix};
pub use store::{Row, TimeSeriesStore};
