#![forbid(unsafe_code)]

//! Geometric primitives: viewport, grid dimensions, cell coordinates, pixel rects.

/// Host viewport in logical (CSS) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Viewport {
    /// Width in logical pixels.
    pub width: u32,
    /// Height in logical pixels.
    pub height: u32,
}

impl Viewport {
    /// Create a new viewport.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Check if the viewport has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Multiplier used by [`CellCoord::to_key`]. Exceeds any realistic column count.
pub const KEY_MULTIPLIER: u32 = 10_000;

/// A grid position. Ordered row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CellCoord {
    /// Row index (0-indexed, top to bottom).
    pub row: u16,
    /// Column index (0-indexed, left to right).
    pub col: u16,
}

impl CellCoord {
    /// Create a new coordinate.
    #[inline]
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }

    /// Pack into a single integer: `row * KEY_MULTIPLIER + col`.
    ///
    /// Only meaningful while `col < KEY_MULTIPLIER`; used for diagnostics and
    /// host interop, never as the set key.
    #[inline]
    pub const fn to_key(self) -> u32 {
        self.row as u32 * KEY_MULTIPLIER + self.col as u32
    }

    /// Reverse of [`CellCoord::to_key`].
    ///
    /// Returns `None` if the decoded row does not fit in `u16`.
    #[inline]
    pub fn from_key(key: u32) -> Option<Self> {
        let row = u16::try_from(key / KEY_MULTIPLIER).ok()?;
        let col = (key % KEY_MULTIPLIER) as u16;
        Some(Self { row, col })
    }
}

/// Grid dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct GridSize {
    /// Number of rows.
    pub rows: u16,
    /// Number of columns.
    pub cols: u16,
}

impl GridSize {
    /// Create a new grid size.
    #[inline]
    pub const fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }

    /// Grid covering `viewport` with square cells of `cell_size` pixels.
    ///
    /// Each axis is `ceil(extent / cell_size) + 1`: the extra cell covers the
    /// partial cell at the right/bottom edge so no gap shows while resizing.
    /// An empty viewport still yields a 1×1 grid. A zero `cell_size` is
    /// treated as 1.
    pub fn for_viewport(viewport: Viewport, cell_size: u16) -> Self {
        let cell = u32::from(cell_size.max(1));
        let axis = |extent: u32| -> u16 {
            let cells = extent.div_ceil(cell).saturating_add(1);
            u16::try_from(cells).unwrap_or(u16::MAX)
        };
        Self {
            rows: axis(viewport.height),
            cols: axis(viewport.width),
        }
    }

    /// Total number of cells.
    #[inline]
    pub const fn area(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Check if the grid has no cells.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Check if `coord` lies inside the grid.
    #[inline]
    pub const fn contains(&self, coord: CellCoord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Convert a signed position into an in-bounds coordinate.
    ///
    /// Returns `None` when either component is negative or past the edge.
    #[inline]
    pub fn clip(&self, row: i64, col: i64) -> Option<CellCoord> {
        let row = u16::try_from(row).ok()?;
        let col = u16::try_from(col).ok()?;
        let coord = CellCoord::new(row, col);
        self.contains(coord).then_some(coord)
    }

    /// Row-major linear index of `coord`. Caller guarantees `contains(coord)`.
    #[inline]
    pub const fn index_of(&self, coord: CellCoord) -> usize {
        coord.row as usize * self.cols as usize + coord.col as usize
    }
}

/// Axis-aligned rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct PixelRect {
    /// Left edge (inclusive).
    pub x: u32,
    /// Top edge (inclusive).
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelRect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle occupied by `coord` in a grid of `cell_size` pixel cells.
    #[inline]
    pub const fn for_cell(coord: CellCoord, cell_size: u16) -> Self {
        let size = cell_size as u32;
        Self::new(coord.col as u32 * size, coord.row as u32 * size, size, size)
    }

    /// Horizontal center (may be fractional).
    #[inline]
    pub fn center_x(&self) -> f64 {
        f64::from(self.x) + f64::from(self.width) / 2.0
    }

    /// Vertical center (may be fractional).
    #[inline]
    pub fn center_y(&self) -> f64 {
        f64::from(self.y) + f64::from(self.height) / 2.0
    }
}
