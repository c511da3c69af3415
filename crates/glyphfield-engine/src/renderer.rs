#![forbid(unsafe_code)]

//! Cell and full-grid drawing.

use glyphfield_core::geometry::{CellCoord, PixelRect};
use glyphfield_render::surface::Surface;

use crate::cell::Cell;
use crate::grid::GridStore;

/// Draws cells onto a [`Surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    cell_size: u16,
}

impl Renderer {
    /// Create a renderer for square cells of `cell_size` pixels.
    #[must_use]
    pub const fn new(cell_size: u16) -> Self {
        Self { cell_size }
    }

    /// Pixel rectangle of `coord`.
    #[inline]
    pub const fn cell_rect(&self, coord: CellCoord) -> PixelRect {
        PixelRect::for_cell(coord, self.cell_size)
    }

    /// Clear exactly the cell's rectangle, then fill its glyph in its color.
    pub fn draw_cell<S: Surface + ?Sized>(&self, surface: &mut S, coord: CellCoord, cell: &Cell) {
        let rect = self.cell_rect(coord);
        surface.clear_rect(rect);
        surface.fill_glyph(rect, cell.symbol(), cell.color());
    }

    /// Clear the surface and draw every cell. Used only on (re)build.
    pub fn full_draw<S: Surface + ?Sized>(&self, surface: &mut S, grid: &GridStore) {
        surface.clear_all();
        for (coord, cell) in grid.iter() {
            let rect = self.cell_rect(coord);
            surface.fill_glyph(rect, cell.symbol(), cell.color());
        }
    }
}
