#![forbid(unsafe_code)]

//! Pointer tracking and neighborhood selection.
//!
//! Pointer positions arrive far more often than the pointer crosses a cell
//! boundary. The tracker remembers the last cell and reports only changes,
//! so sub-cell jitter never re-activates anything.

use glyphfield_core::geometry::{CellCoord, GridSize};

/// Signed cell position; may lie outside the grid.
pub type GridPos = (i64, i64);

/// Last cell under the pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerTracker {
    tracked: Option<GridPos>,
}

impl PointerTracker {
    /// Create a tracker with no tracked cell.
    #[must_use]
    pub const fn new() -> Self {
        Self { tracked: None }
    }

    /// Cell currently tracked, if any.
    #[inline]
    pub const fn tracked(&self) -> Option<GridPos> {
        self.tracked
    }

    /// Record a pointer position in pixels.
    ///
    /// Returns the new cell when it differs from the tracked one. Non-finite
    /// coordinates are ignored.
    pub fn moved(&mut self, x: f64, y: f64, cell_size: u16) -> Option<GridPos> {
        let pos = cell_at(x, y, cell_size)?;
        if self.tracked == Some(pos) {
            return None;
        }
        self.tracked = Some(pos);
        Some(pos)
    }

    /// Pointer left the surface: forget the tracked cell.
    pub fn left(&mut self) {
        self.tracked = None;
    }
}

/// Cell containing pixel `(x, y)`: `(floor(y / size), floor(x / size))`.
pub fn cell_at(x: f64, y: f64, cell_size: u16) -> Option<GridPos> {
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    let size = f64::from(cell_size.max(1));
    Some(((y / size).floor() as i64, (x / size).floor() as i64))
}

/// In-bounds cells of the `(2r+1)²` block centered on `center`, row-major.
pub fn neighborhood(
    center: GridPos,
    radius: u16,
    grid: GridSize,
) -> impl Iterator<Item = CellCoord> {
    let r = i64::from(radius);
    let (row, col) = center;
    (row.saturating_sub(r)..=row.saturating_add(r))
        .flat_map(move |rr| {
            (col.saturating_sub(r)..=col.saturating_add(r)).map(move |cc| (rr, cc))
        })
        .filter_map(move |(rr, cc)| grid.clip(rr, cc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_at_floors() {
        assert_eq!(cell_at(39.9, 20.0, 20), Some((1, 1)));
        assert_eq!(cell_at(0.0, 0.0, 20), Some((0, 0)));
        assert_eq!(cell_at(-0.5, 5.0, 20), Some((0, -1)));
    }

    #[test]
    fn cell_at_rejects_nan() {
        assert_eq!(cell_at(f64::NAN, 0.0, 20), None);
        assert_eq!(cell_at(0.0, f64::INFINITY, 20), None);
    }

    #[test]
    fn jitter_within_cell_is_coalesced() {
        let mut tracker = PointerTracker::new();
        assert_eq!(tracker.moved(105.0, 105.0, 20), Some((5, 5)));
        assert_eq!(tracker.moved(110.0, 119.0, 20), None);
        assert_eq!(tracker.moved(120.0, 119.0, 20), Some((5, 6)));
    }

    #[test]
    fn leave_resets_tracking() {
        let mut tracker = PointerTracker::new();
        tracker.moved(5.0, 5.0, 20);
        tracker.left();
        assert_eq!(tracker.tracked(), None);
        // Re-entering the same cell counts as a change.
        assert_eq!(tracker.moved(5.0, 5.0, 20), Some((0, 0)));
    }

    #[test]
    fn neighborhood_interior_is_full_block() {
        let cells: Vec<_> = neighborhood((5, 5), 1, GridSize::new(10, 10)).collect();
        assert_eq!(cells.len(), 9);
        assert_eq!(cells.first(), Some(&CellCoord::new(4, 4)));
        assert_eq!(cells.last(), Some(&CellCoord::new(6, 6)));
    }

    #[test]
    fn neighborhood_clips_at_corner() {
        let cells: Vec<_> = neighborhood((0, 0), 1, GridSize::new(10, 10)).collect();
        assert_eq!(
            cells,
            vec![
                CellCoord::new(0, 0),
                CellCoord::new(0, 1),
                CellCoord::new(1, 0),
                CellCoord::new(1, 1)
            ]
        );
    }

    #[test]
    fn neighborhood_fully_outside_is_empty() {
        assert_eq!(neighborhood((-5, -5), 1, GridSize::new(3, 3)).count(), 0);
    }

    #[test]
    fn huge_coordinates_saturate() {
        assert_eq!(cell_at(-1e300, 10.0, 20), Some((0, i64::MIN)));
        assert_eq!(neighborhood((0, i64::MIN), 1, GridSize::new(10, 10)).count(), 0);
        assert_eq!(neighborhood((i64::MAX, 0), 1, GridSize::new(10, 10)).count(), 0);
    }

    #[test]
    fn neighborhood_radius_zero_is_center() {
        let cells: Vec<_> = neighborhood((2, 1), 0, GridSize::new(3, 3)).collect();
        assert_eq!(cells, vec![CellCoord::new(2, 1)]);
    }
}
