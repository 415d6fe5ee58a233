//! `ips-output`: table writers for simulation runs.
//!
//! | Feature   | Backend | Output                                              |
//! |-----------|---------|-----------------------------------------------------|
//! | *(none)*  | CSV     | one file: `tick,timestamp,<record columns…>`        |
//! | `sqlite`  | SQLite  | one `readings` table, column affinity per kind      |
//!
//! Both backends implement [`OutputWriter`].  Rows reach a writer either
//! live, through [`SimOutputObserver`] (an `ips_sim::SimObserver`), or after
//! the fact via [`export_store`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use ips_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::create(Path::new("readings.csv"), StoreFloorRecord::COLUMNS)?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod export;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use export::export_store;
pub use observer::SimOutputObserver;
pub use row::TableRow;
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
