//! Integer grid coordinates and the bounded monitoring area.
//!
//! The monitored floor is a `width × height` grid of cells with the origin at
//! the top-left corner.  Positions are signed so that noisy samples outside
//! the area can be represented (and then dropped by the heatmap) instead of
//! wrapping around.

use std::fmt;

use crate::{IpsError, IpsResult};

/// A cell position on the monitored floor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
}

impl Coordinates {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in grid units.
    ///
    /// Computed in `f64` from `i64` deltas so extreme coordinates cannot
    /// overflow.
    pub fn distance(self, other: Coordinates) -> f64 {
        let dx = (other.x as i64 - self.x as i64) as f64;
        let dy = (other.y as i64 - self.y as i64) as f64;
        dx.hypot(dy)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── GridSize ──────────────────────────────────────────────────────────────────

/// Largest accepted grid side.  Keeps `width * height` comfortably inside
/// `usize` on 32-bit targets and the rendered image a sane size.
pub const MAX_GRID_SIDE: u32 = 4_096;

/// Dimensions of the monitored area, in cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSize {
    pub width:  u32,
    pub height: u32,
}

impl GridSize {
    /// Validate and construct.  Both sides must be in `1..=MAX_GRID_SIDE`.
    pub fn new(width: u32, height: u32) -> IpsResult<Self> {
        if !(1..=MAX_GRID_SIDE).contains(&width) || !(1..=MAX_GRID_SIDE).contains(&height) {
            return Err(IpsError::Config(format!(
                "grid dimensions {width}x{height} outside 1..={MAX_GRID_SIDE}"
            )));
        }
        Ok(Self { width, height })
    }

    /// `true` if `pos` lies in `[0, width) × [0, height)`.
    #[inline]
    pub fn contains(self, pos: Coordinates) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    #[inline]
    pub fn cell_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row-major index of an in-bounds position.
    #[inline]
    pub fn index_of(self, pos: Coordinates) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    /// The cell nearest the middle of the area.
    pub fn center(self) -> Coordinates {
        Coordinates::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Distance from the centre to the farthest corner, in grid units.
    pub fn half_diagonal(self) -> f64 {
        (self.width as f64).hypot(self.height as f64) / 2.0
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
