#![forbid(unsafe_code)]

//! Canvas frontend for glyphfield.
//!
//! The page owns the `<canvas>`, the `requestAnimationFrame` loop, and the
//! DOM listeners; it forwards everything to a [`GlyphFieldWeb`]:
//!
//! ```js
//! const field = new GlyphFieldWeb();
//! field.init(canvas, { cell_size: 20 });
//! canvas.addEventListener("pointermove", (e) => field.pointerMove(e.offsetX, e.offsetY));
//! canvas.addEventListener("pointerleave", () => field.pointerLeave());
//! new ResizeObserver(() => field.resize(
//!   canvas.clientWidth, canvas.clientHeight, devicePixelRatio, performance.now(),
//! )).observe(canvas);
//! const tick = (now) => { if (field.frame(now)) requestAnimationFrame(tick); };
//! requestAnimationFrame(tick);
//! ```
//!
//! Everything that does not touch the DOM (options, canvas sizing, clock
//! conversion) lives here and compiles on every target.

pub mod options;

#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::GlyphFieldWeb;

pub use options::{WebError, WebOptions};

use std::time::Duration;

use glyphfield_core::geometry::Viewport;

/// Largest device pixel ratio honored; higher values are clamped.
pub const MAX_DPR: f64 = 8.0;

/// Logical and backing-store dimensions of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    /// Width in CSS pixels (engine viewport).
    pub css_width: u32,
    /// Height in CSS pixels (engine viewport).
    pub css_height: u32,
    /// Backing store width in device pixels.
    pub backing_width: u32,
    /// Backing store height in device pixels.
    pub backing_height: u32,
    /// Context scale mapping CSS pixels to device pixels.
    pub scale: f64,
}

impl CanvasSize {
    /// Compute sizes from the element's client size and `devicePixelRatio`.
    pub fn new(css_width: f64, css_height: f64, dpr: f64) -> Self {
        let scale = sanitize_dpr(dpr);
        let css_width = to_px(css_width);
        let css_height = to_px(css_height);
        Self {
            css_width,
            css_height,
            backing_width: to_px(f64::from(css_width) * scale),
            backing_height: to_px(f64::from(css_height) * scale),
            scale,
        }
    }

    /// Engine viewport (logical pixels).
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.css_width, self.css_height)
    }
}

/// Non-finite or non-positive ratios become 1; large ones are clamped.
pub fn sanitize_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 {
        dpr.min(MAX_DPR)
    } else {
        1.0
    }
}

fn to_px(v: f64) -> u32 {
    if v.is_finite() && v > 0.0 {
        v.round().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

/// Convert a `performance.now()` timestamp to the engine clock.
///
/// Negative, non-finite, or overflowing values map to zero.
pub fn timestamp(now_ms: f64) -> Duration {
    if !now_ms.is_finite() || now_ms <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(now_ms / 1_000.0).unwrap_or(Duration::ZERO)
}

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct GlyphFieldWeb;

#[cfg(not(target_arch = "wasm32"))]
impl GlyphFieldWeb {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}
