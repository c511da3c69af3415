#![forbid(unsafe_code)]

//! Grid store: one [`Cell`] per `(row, col)`, rebuilt wholesale on resize.
//!
//! # Invariants
//!
//! 1. `cells.len() == size.area()`
//! 2. Cells are row-major: `index = row * cols + col`.
//! 3. A freshly built grid is entirely idle in the base tone.

use glyphfield_core::geometry::{CellCoord, GridSize};
use glyphfield_core::rng::XorShift64;
use glyphfield_render::color::Rgb;
use glyphfield_render::glyph::GlyphSource;

use crate::cell::Cell;

/// Row-major storage of cells.
#[derive(Debug, Clone)]
pub struct GridStore {
    size: GridSize,
    cells: Vec<Cell>,
}

impl GridStore {
    /// Build a grid of `size` with fresh random glyphs, all idle in `base`.
    pub fn build(size: GridSize, glyphs: &GlyphSource, rng: &mut XorShift64, base: Rgb) -> Self {
        let cells = (0..size.area())
            .map(|_| Cell::new(glyphs.draw(rng), base))
            .collect();
        Self { size, cells }
    }

    /// Grid dimensions.
    #[inline]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Cell at `coord`, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, coord: CellCoord) -> Option<&Cell> {
        if !self.size.contains(coord) {
            return None;
        }
        self.cells.get(self.size.index_of(coord))
    }

    /// Mutable cell at `coord`, or `None` when out of bounds.
    #[inline]
    pub fn get_mut(&mut self, coord: CellCoord) -> Option<&mut Cell> {
        if !self.size.contains(coord) {
            return None;
        }
        let idx = self.size.index_of(coord);
        self.cells.get_mut(idx)
    }

    /// All cells with their coordinates, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, &Cell)> + '_ {
        let cols = self.size.cols.max(1) as usize;
        self.cells.iter().enumerate().map(move |(idx, cell)| {
            let coord = CellCoord::new((idx / cols) as u16, (idx % cols) as u16);
            (coord, cell)
        })
    }

    /// Number of cells not at rest. O(n); intended for tests and diagnostics.
    pub fn animating_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.state().is_idle()).count()
    }
}
