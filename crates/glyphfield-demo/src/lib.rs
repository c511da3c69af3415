#![forbid(unsafe_code)]

//! Terminal host for glyphfield.
//!
//! Each terminal cell is one grid cell: the engine runs with a cell size of
//! one "pixel" and a viewport of `cols × rows`, drawing into a
//! [`GlyphBuffer`](glyphfield_render::buffer::GlyphBuffer) whose dirty rows
//! are flushed to the terminal with crossterm.

pub mod app;
pub mod cli;
pub mod input;
pub mod presenter;
pub mod session;
pub mod telemetry;
