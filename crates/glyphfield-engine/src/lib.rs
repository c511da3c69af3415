#![forbid(unsafe_code)]

//! Engine: the pointer-driven glyph grid animation.
//!
//! A grid of single-glyph cells sits at rest in a base tone. When the pointer
//! enters a cell, the idle cells of the surrounding block start *scrambling*
//! (flickering through random glyphs on a throttled cadence), then *settle*:
//! the original glyph returns and the color fades back to base. Only cells in
//! the dirty set are touched each frame.
//!
//! ```
//! use std::time::Duration;
//! use glyphfield_core::geometry::Viewport;
//! use glyphfield_engine::{Engine, EngineConfig};
//! use glyphfield_render::buffer::GlyphBuffer;
//!
//! let mut engine = Engine::new(EngineConfig::default(), Viewport::new(180, 180)).unwrap();
//! let size = engine.grid().size();
//! let mut surface = GlyphBuffer::new(size.cols, size.rows, 20);
//!
//! engine.pointer_moved(110.0, 110.0);
//! let outcome = engine.frame(&mut surface, Duration::ZERO);
//! assert!(outcome.keep_running);
//! assert_eq!(outcome.active_cells, 9);
//! ```

pub mod cell;
pub mod config;
pub mod dirty;
pub mod engine;
pub mod grid;
pub mod pointer;
pub mod renderer;
pub mod scheduler;

pub use cell::{Cell, CellState};
pub use config::{ConfigError, EngineConfig};
pub use engine::{Engine, EngineStats, FrameOutcome};
