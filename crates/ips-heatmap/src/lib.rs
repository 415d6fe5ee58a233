//! `ips-heatmap`: spatial activity accumulation and rendering.
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`grid`]   | `HeatmapGrid` accumulator, read-only `GridView`            |
//! | [`color`]  | `intensity_color`: count → RGB                            |
//! | [`encode`] | `encode`, `encode_to_vec`, `save` (write-then-rename)      |
//! | [`error`]  | `HeatmapError`, `HeatmapResult`                            |
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut grid = HeatmapGrid::new(GridSize::new(50, 50)?);
//! grid.add_data(10, 12);
//! ips_heatmap::save(&grid.snapshot(), Path::new("out/heatmap.png"))?;
//! ```

pub mod color;
pub mod encode;
pub mod error;
pub mod grid;


pub use color::{intensity_color, Rgb, INTENSITY_STEP};
pub use encode::{encode, encode_to_vec, save, RasterFormat};
pub use error::{HeatmapError, HeatmapResult};
pub use grid::{GridView, HeatmapGrid};
