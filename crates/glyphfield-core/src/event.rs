#![forbid(unsafe_code)]

//! Canonical host events.
//!
//! Hosts (browser canvas, terminal) translate their native input into these
//! types before handing them to the engine. Coordinates are viewport-relative
//! logical pixels; a terminal host uses one "pixel" per terminal cell.

use crate::geometry::Viewport;

/// Pointer input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved to `(x, y)` in viewport coordinates.
    Moved {
        /// Horizontal position.
        x: f64,
        /// Vertical position.
        y: f64,
    },
    /// Pointer left the surface.
    Left,
}

impl PointerEvent {
    /// Convenience constructor for [`PointerEvent::Moved`].
    #[inline]
    pub const fn moved(x: f64, y: f64) -> Self {
        Self::Moved { x, y }
    }
}

/// Any event the engine consumes between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Pointer movement or departure.
    Pointer(PointerEvent),
    /// Viewport size changed.
    Resize(Viewport),
}

impl From<PointerEvent> for Event {
    fn from(event: PointerEvent) -> Self {
        Self::Pointer(event)
    }
}

impl From<Viewport> for Event {
    fn from(viewport: Viewport) -> Self {
        Self::Resize(viewport)
    }
}
