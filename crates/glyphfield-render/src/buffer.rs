#![forbid(unsafe_code)]

//! In-memory glyph buffer.
//!
//! [`GlyphBuffer`] is a [`Surface`] backed by a grid of slots, one slot per
//! `unit × unit` pixel square. The terminal host uses it with `unit = 1`
//! (one slot per terminal cell) and flushes only the rows touched since the
//! last present. Tests use it to observe exactly what the renderer drew.
//!
//! # Layout
//!
//! Slots are stored in row-major order: `index = y * cols + x`.
//!
//! # Invariants
//!
//! 1. `slots.len() == cols * rows`
//! 2. `dirty_rows.len() == rows`
//! 3. Any mutation of a slot marks its row dirty.

use glyphfield_core::geometry::PixelRect;

use crate::color::Rgb;
use crate::surface::Surface;

/// One drawn position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Glyph shown; `' '` when cleared.
    pub glyph: char,
    /// Glyph color.
    pub color: Rgb,
}

impl Slot {
    /// A cleared slot.
    pub const EMPTY: Self = Self {
        glyph: ' ',
        color: Rgb::BLACK,
    };

    /// Whether the slot holds nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

impl Default for Slot {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Counters of surface operations since the last [`GlyphBuffer::reset_stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceStats {
    /// `clear_rect` calls.
    pub rect_clears: u64,
    /// `fill_glyph` calls.
    pub glyph_fills: u64,
    /// `clear_all` calls.
    pub full_clears: u64,
}

/// A slot grid implementing [`Surface`].
///
/// # Example
///
/// ```
/// use glyphfield_core::geometry::PixelRect;
/// use glyphfield_render::buffer::GlyphBuffer;
/// use glyphfield_render::color::Rgb;
/// use glyphfield_render::surface::Surface;
///
/// let mut buffer = GlyphBuffer::new(4, 2, 10);
/// // A fresh buffer starts fully dirty.
/// assert_eq!(buffer.take_dirty_rows(), vec![0, 1]);
///
/// buffer.fill_glyph(PixelRect::new(10, 0, 10, 10), 'A', Rgb::WHITE);
/// assert_eq!(buffer.get(1, 0).map(|s| s.glyph), Some('A'));
/// assert_eq!(buffer.take_dirty_rows(), vec![0]);
/// ```
#[derive(Debug, Clone)]
pub struct GlyphBuffer {
    cols: u16,
    rows: u16,
    unit: u32,
    slots: Vec<Slot>,
    dirty_rows: Vec<bool>,
    stats: SurfaceStats,
}

impl GlyphBuffer {
    /// Create a buffer of `cols × rows` slots, each `unit` pixels square.
    ///
    /// A zero `unit` is treated as 1.
    pub fn new(cols: u16, rows: u16, unit: u32) -> Self {
        let len = cols as usize * rows as usize;
        Self {
            cols,
            rows,
            unit: unit.max(1),
            slots: vec![Slot::EMPTY; len],
            dirty_rows: vec![true; rows as usize],
            stats: SurfaceStats::default(),
        }
    }

    /// Width in slots.
    #[inline]
    pub const fn cols(&self) -> u16 {
        self.cols
    }

    /// Height in slots.
    #[inline]
    pub const fn rows(&self) -> u16 {
        self.rows
    }

    /// Resize, discarding all content. Every row becomes dirty.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.slots = vec![Slot::EMPTY; cols as usize * rows as usize];
        self.dirty_rows = vec![true; rows as usize];
    }

    /// Slot at `(x, y)`, or `None` out of bounds.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Slot> {
        if x >= self.cols || y >= self.rows {
            return None;
        }
        self.slots.get(y as usize * self.cols as usize + x as usize)
    }

    /// All slots of row `y`.
    pub fn row(&self, y: u16) -> &[Slot] {
        if y >= self.rows {
            return &[];
        }
        let start = y as usize * self.cols as usize;
        &self.slots[start..start + self.cols as usize]
    }

    /// Glyphs of row `y` as a string.
    pub fn row_text(&self, y: u16) -> String {
        self.row(y).iter().map(|s| s.glyph).collect()
    }

    /// Rows touched since the last call, in ascending order. Clears the marks.
    pub fn take_dirty_rows(&mut self) -> Vec<u16> {
        let mut rows = Vec::new();
        for (y, dirty) in self.dirty_rows.iter_mut().enumerate() {
            if *dirty {
                rows.push(y as u16);
                *dirty = false;
            }
        }
        rows
    }

    /// Whether any row is dirty.
    pub fn has_dirty_rows(&self) -> bool {
        self.dirty_rows.iter().any(|&d| d)
    }

    /// Operation counters.
    #[inline]
    pub const fn stats(&self) -> SurfaceStats {
        self.stats
    }

    fn set(&mut self, x: u16, y: u16, slot: Slot) {
        let idx = y as usize * self.cols as usize + x as usize;
        if let Some(existing) = self.slots.get_mut(idx) {
            *existing = slot;
            self.dirty_rows[y as usize] = true;
        }
    }

    /// Slot span `[start, end)` covered by a pixel span, clipped to `limit`.
    fn span(&self, start: u32, len: u32, limit: u16) -> (u16, u16) {
        let first = start / self.unit;
        let last = start.saturating_add(len).div_ceil(self.unit);
        let clip = |v: u32| v.min(u32::from(limit)) as u16;
        (clip(first), clip(last))
    }
}

impl Surface for GlyphBuffer {
    fn clear_rect(&mut self, rect: PixelRect) {
        self.stats.rect_clears += 1;
        let (x0, x1) = self.span(rect.x, rect.width, self.cols);
        let (y0, y1) = self.span(rect.y, rect.height, self.rows);
        for y in y0..y1 {
            for x in x0..x1 {
                self.set(x, y, Slot::EMPTY);
            }
        }
    }

    fn fill_glyph(&mut self, rect: PixelRect, glyph: char, color: Rgb) {
        self.stats.glyph_fills += 1;
        let x = (rect.center_x() / f64::from(self.unit)).floor();
        let y = (rect.center_y() / f64::from(self.unit)).floor();
        if x < f64::from(self.cols) && y < f64::from(self.rows) {
            self.set(x as u16, y as u16, Slot { glyph, color });
        }
    }

    fn clear_all(&mut self) {
        self.stats.full_clears += 1;
        self.slots.fill(Slot::EMPTY);
        self.dirty_rows.fill(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_empty_and_dirty() {
        let mut buf = GlyphBuffer::new(3, 2, 1);
        assert!(buf.get(2, 1).unwrap().is_empty());
        assert_eq!(buf.take_dirty_rows(), vec![0, 1]);
        assert!(!buf.has_dirty_rows());
    }

    #[test]
    fn fill_uses_rect_center() {
        let mut buf = GlyphBuffer::new(5, 5, 20);
        buf.fill_glyph(PixelRect::new(40, 20, 20, 20), 'Q', Rgb::WHITE);
        assert_eq!(buf.get(2, 1).unwrap().glyph, 'Q');
        assert_eq!(buf.stats().glyph_fills, 1);
    }

    #[test]
    fn fill_out_of_bounds_is_ignored() {
        let mut buf = GlyphBuffer::new(2, 2, 1);
        buf.take_dirty_rows();
        buf.fill_glyph(PixelRect::new(5, 5, 1, 1), 'Z', Rgb::WHITE);
        assert!(!buf.has_dirty_rows());
    }

    #[test]
    fn clear_rect_only_touches_covered_slots() {
        let mut buf = GlyphBuffer::new(3, 3, 10);
        for y in 0..3u32 {
            for x in 0..3u32 {
                buf.fill_glyph(PixelRect::new(x * 10, y * 10, 10, 10), 'x', Rgb::WHITE);
            }
        }
        buf.take_dirty_rows();
        buf.clear_rect(PixelRect::new(10, 10, 10, 10));
        assert_eq!(buf.row_text(0), "xxx");
        assert_eq!(buf.row_text(1), "x x");
        assert_eq!(buf.row_text(2), "xxx");
        assert_eq!(buf.take_dirty_rows(), vec![1]);
    }

    #[test]
    fn clear_all_wipes_everything() {
        let mut buf = GlyphBuffer::new(2, 2, 1);
        buf.fill_glyph(PixelRect::new(0, 0, 1, 1), 'a', Rgb::WHITE);
        buf.clear_all();
        assert_eq!(buf.row_text(0), "  ");
        assert_eq!(buf.stats().full_clears, 1);
    }

    #[test]
    fn resize_discards_content() {
        let mut buf = GlyphBuffer::new(2, 2, 1);
        buf.fill_glyph(PixelRect::new(0, 0, 1, 1), 'a', Rgb::WHITE);
        buf.take_dirty_rows();
        buf.resize(4, 3);
        assert_eq!(buf.cols(), 4);
        assert_eq!(buf.rows(), 3);
        assert_eq!(buf.row_text(0), "    ");
        assert_eq!(buf.take_dirty_rows(), vec![0, 1, 2]);
    }

    #[test]
    fn row_out_of_bounds_is_empty() {
        let buf = GlyphBuffer::new(2, 2, 1);
        assert!(buf.row(9).is_empty());
        assert!(buf.get(0, 9).is_none());
    }
}
