#![forbid(unsafe_code)]

//! Render: colors, glyph alphabets, and the drawing-surface boundary.
//!
//! The engine never touches a canvas or terminal directly. It draws through
//! the [`surface::Surface`] trait; hosts supply an implementation and the
//! in-memory [`buffer::GlyphBuffer`] serves tests and the terminal host.

pub mod buffer;
pub mod color;
pub mod glyph;
pub mod surface;
