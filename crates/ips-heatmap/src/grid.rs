//! Fixed-size spatial hit accumulator.

use ips_core::{Coordinates, GridSize};

use crate::HeatmapResult;

/// `width × height` matrix of hit counts, row-major, origin top-left.
///
/// Cells only ever grow.  Samples outside `[0, width) × [0, height)` are
/// dropped without error (noise outside the monitored area) and counted in
/// [`dropped`][Self::dropped].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeatmapGrid {
    size:    GridSize,
    cells:   Vec<u32>,
    total:   u64,
    dropped: u64,
}

impl HeatmapGrid {
    /// All-zero grid.
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![0; size.cell_count()],
            total: 0,
            dropped: 0,
        }
    }

    /// Validate the dimensions and build an all-zero grid.
    pub fn with_dimensions(width: u32, height: u32) -> HeatmapResult<Self> {
        Ok(Self::new(GridSize::new(width, height)?))
    }

    /// Record one hit at `(x, y)`.  Returns `false` if the sample fell
    /// outside the grid and was dropped.
    pub fn add_data(&mut self, x: i32, y: i32) -> bool {
        self.add(Coordinates::new(x, y))
    }

    /// [`add_data`][Self::add_data] for a `Coordinates` value.
    pub fn add(&mut self, pos: Coordinates) -> bool {
        match self.size.index_of(pos) {
            Some(idx) => {
                self.cells[idx] = self.cells[idx].saturating_add(1);
                self.total += 1;
                true
            }
            None => {
                self.dropped += 1;
                false
            }
        }
    }

    /// Hit count at `(x, y)`, `None` if out of bounds.
    pub fn cell(&self, x: i32, y: i32) -> Option<u32> {
        self.size
            .index_of(Coordinates::new(x, y))
            .map(|idx| self.cells[idx])
    }

    /// Number of in-bounds samples recorded.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of out-of-bounds samples ignored.
    #[inline]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Largest cell value, 0 for an empty grid.
    pub fn max(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    #[inline]
    pub fn size(&self) -> GridSize {
        self.size
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Read-only view for rendering.
    pub fn snapshot(&self) -> GridView<'_> {
        GridView {
            size:  self.size,
            cells: &self.cells,
        }
    }
}

// ── GridView ──────────────────────────────────────────────────────────────────

/// Borrowed, immutable view of a grid's cells.
#[derive(Copy, Clone, Debug)]
pub struct GridView<'a> {
    size:  GridSize,
    cells: &'a [u32],
}

impl<'a> GridView<'a> {
    #[inline]
    pub fn width(&self) -> u32 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Value at `(x, y)`; the caller guarantees in-bounds indices.
    ///
    /// # Panics
    /// Panics if `(x, y)` is outside the grid.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u32 {
        self.cells[y as usize * self.size.width as usize + x as usize]
    }

    /// Flat row-major cells.
    #[inline]
    pub fn cells(&self) -> &'a [u32] {
        self.cells
    }

    /// Rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &'a [u32]> + 'a {
        self.cells.chunks(self.size.width as usize)
    }
}
