//! Property-based invariant tests for grid geometry.
//!
//! 1. A grid always covers its viewport (plus margin) for any cell size.
//! 2. `clip` agrees with `contains`.
//! 3. Packed keys are unique for distinct in-range coordinates.
//! 4. Row-major index is a bijection onto `0..area`.

use glyphfield_core::geometry::{CellCoord, GridSize, KEY_MULTIPLIER, PixelRect, Viewport};
use proptest::prelude::*;

proptest! {
    #[test]
    fn grid_covers_viewport(w in 0u32..8_000, h in 0u32..8_000, cell in 1u16..64) {
        let grid = GridSize::for_viewport(Viewport::new(w, h), cell);
        let covered_w = u32::from(grid.cols) * u32::from(cell);
        let covered_h = u32::from(grid.rows) * u32::from(cell);
        prop_assert!(covered_w >= w + u32::from(cell));
        prop_assert!(covered_h >= h + u32::from(cell));
        // Never more than two cells of slack per axis.
        prop_assert!(covered_w < w + 2 * u32::from(cell) + 1);
        prop_assert!(covered_h < h + 2 * u32::from(cell) + 1);
    }

    #[test]
    fn clip_agrees_with_contains(rows in 1u16..200, cols in 1u16..200, r in -5i64..210, c in -5i64..210) {
        let grid = GridSize::new(rows, cols);
        match grid.clip(r, c) {
            Some(coord) => {
                prop_assert!(grid.contains(coord));
                prop_assert_eq!(i64::from(coord.row), r);
                prop_assert_eq!(i64::from(coord.col), c);
            }
            None => prop_assert!(r < 0 || c < 0 || r >= i64::from(rows) || c >= i64::from(cols)),
        }
    }

    #[test]
    fn packed_keys_do_not_collide(
        a in (0u16..500, 0u16..(KEY_MULTIPLIER as u16)),
        b in (0u16..500, 0u16..(KEY_MULTIPLIER as u16)),
    ) {
        let ca = CellCoord::new(a.0, a.1);
        let cb = CellCoord::new(b.0, b.1);
        prop_assert_eq!(ca == cb, ca.to_key() == cb.to_key());
        prop_assert_eq!(CellCoord::from_key(ca.to_key()), Some(ca));
    }

    #[test]
    fn cell_rects_tile_without_overlap(r in 0u16..100, c in 0u16..100, cell in 1u16..40) {
        let here = PixelRect::for_cell(CellCoord::new(r, c), cell);
        let right = PixelRect::for_cell(CellCoord::new(r, c + 1), cell);
        let below = PixelRect::for_cell(CellCoord::new(r + 1, c), cell);
        prop_assert_eq!(here.x + here.width, right.x);
        prop_assert_eq!(here.y + here.height, below.y);
    }
}

#[test]
fn row_major_index_is_bijective() {
    let grid = GridSize::new(7, 13);
    let mut seen = vec![false; grid.area()];
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let idx = grid.index_of(CellCoord::new(row, col));
            assert!(!seen[idx], "index {idx} visited twice");
            seen[idx] = true;
        }
    }
    assert!(seen.into_iter().all(|s| s));
}
