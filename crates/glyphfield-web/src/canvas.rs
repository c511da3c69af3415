#![forbid(unsafe_code)]

//! [`Surface`] over an HTML canvas 2D context.

use glyphfield_core::geometry::PixelRect;
use glyphfield_render::color::Rgb;
use glyphfield_render::surface::Surface;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::CanvasSize;

/// Draws glyphs centered in their cells, in CSS pixel coordinates.
pub(crate) struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    size: CanvasSize,
    last_fill: Option<Rgb>,
}

impl CanvasSurface {
    pub(crate) fn new(ctx: CanvasRenderingContext2d, size: CanvasSize) -> Self {
        Self {
            ctx,
            size,
            last_fill: None,
        }
    }

    /// Re-apply scale and text state.
    ///
    /// Resizing the backing store resets the whole context, so this runs
    /// after every `set_width`/`set_height`.
    pub(crate) fn configure(&mut self, size: CanvasSize, font: &str) -> Result<(), JsValue> {
        self.size = size;
        self.last_fill = None;
        self.ctx
            .set_transform(size.scale, 0.0, 0.0, size.scale, 0.0, 0.0)?;
        self.ctx.set_font(font);
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        Ok(())
    }
}

impl Surface for CanvasSurface {
    fn clear_rect(&mut self, rect: PixelRect) {
        self.ctx.clear_rect(
            f64::from(rect.x),
            f64::from(rect.y),
            f64::from(rect.width),
            f64::from(rect.height),
        );
    }

    fn fill_glyph(&mut self, rect: PixelRect, glyph: char, color: Rgb) {
        if self.last_fill != Some(color) {
            self.ctx.set_fill_style_str(&color.to_hex());
            self.last_fill = Some(color);
        }
        let mut buf = [0u8; 4];
        if self
            .ctx
            .fill_text(glyph.encode_utf8(&mut buf), rect.center_x(), rect.center_y())
            .is_err()
        {
            glyphfield_core::warn!(x = rect.x, y = rect.y, "canvas context rejected glyph");
        }
    }

    fn clear_all(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            f64::from(self.size.css_width),
            f64::from(self.size.css_height),
        );
    }
}
