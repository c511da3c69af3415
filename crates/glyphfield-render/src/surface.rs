#![forbid(unsafe_code)]

//! The drawing-surface boundary.

use glyphfield_core::geometry::PixelRect;

use crate::color::Rgb;

/// A 2D surface the renderer draws onto.
///
/// Coordinates are logical pixels. Implementations handle device-pixel
/// scaling themselves.
pub trait Surface {
    /// Clear exactly `rect` to the background.
    fn clear_rect(&mut self, rect: PixelRect);

    /// Fill `glyph` centered in `rect` using `color`.
    fn fill_glyph(&mut self, rect: PixelRect, glyph: char, color: Rgb);

    /// Clear the entire surface.
    fn clear_all(&mut self);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn clear_rect(&mut self, rect: PixelRect) {
        (**self).clear_rect(rect);
    }

    fn fill_glyph(&mut self, rect: PixelRect, glyph: char, color: Rgb) {
        (**self).fill_glyph(rect, glyph, color);
    }

    fn clear_all(&mut self) {
        (**self).clear_all();
    }
}
