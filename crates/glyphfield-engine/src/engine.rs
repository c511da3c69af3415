#![forbid(unsafe_code)]

//! The engine: grid, dirty set, pointer tracker, cadence, and resize
//! debouncing behind one host-driven object.
//!
//! # Frame loop
//!
//! The host calls [`Engine::frame`] once per display frame with a monotonic
//! timestamp and its surface. Each frame:
//!
//! 1. applies a debounced resize whose deadline has passed (full rebuild),
//! 2. performs the full draw if the grid was (re)built,
//! 3. decides whether this is a scramble frame,
//! 4. advances every cell in the dirty set, drawing the ones that changed
//!    and collecting the ones that went idle (or fell outside the grid),
//! 5. removes the collected coordinates after the pass.
//!
//! Pointer and resize events are applied synchronously between frames.
//! Cancellation is [`Engine::stop`]: every later frame reports
//! `keep_running == false` and does nothing, so the host stops requesting
//! frames.
//!
//! # Invariants (checked after every frame in tests)
//!
//! - A coordinate is in the dirty set iff its cell is not idle.
//! - An idle cell has no original glyph.

use std::time::Duration;

use glyphfield_core::debounce::ResizeDebouncer;
use glyphfield_core::event::{Event, PointerEvent};
use glyphfield_core::geometry::{CellCoord, GridSize, Viewport};
use glyphfield_core::rng::XorShift64;
use glyphfield_render::glyph::GlyphSource;
use glyphfield_render::surface::Surface;

use crate::cell::{Cell, FrameContext};
use crate::config::{ConfigError, EngineConfig};
use crate::dirty::DirtySet;
use crate::grid::GridStore;
use crate::pointer::{self, GridPos, PointerTracker};
use crate::renderer::Renderer;
use crate::scheduler::ScrambleCadence;

/// What one call to [`Engine::frame`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOutcome {
    /// Whether the host should request another frame.
    pub keep_running: bool,
    /// Whether the grid was rebuilt (and fully redrawn) this frame.
    pub rebuilt: bool,
    /// Whether the scramble cadence fired.
    pub scramble_frame: bool,
    /// Cells redrawn individually.
    pub cells_drawn: usize,
    /// Coordinates removed from the dirty set.
    pub cells_retired: usize,
    /// Dirty set size after the frame.
    pub active_cells: usize,
}

/// Cumulative counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineStats {
    /// Frames processed while running.
    pub frames: u64,
    /// Frames on which the scramble cadence fired.
    pub scramble_frames: u64,
    /// Individual cell redraws.
    pub cells_drawn: u64,
    /// Idle cells that accepted activation.
    pub activations: u64,
    /// Grid rebuilds, including the initial build.
    pub rebuilds: u64,
}

/// Pointer-driven glyph grid animation engine.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    glyphs: GlyphSource,
    rng: XorShift64,
    viewport: Viewport,
    grid: GridStore,
    dirty: DirtySet,
    pointer: PointerTracker,
    cadence: ScrambleCadence,
    resize: ResizeDebouncer,
    renderer: Renderer,
    retired: Vec<CellCoord>,
    needs_full_draw: bool,
    running: bool,
    stats: EngineStats,
}

impl Engine {
    /// Validate `config` and build the initial grid for `viewport`.
    ///
    /// The first [`frame`](Self::frame) performs the full draw.
    pub fn new(config: EngineConfig, viewport: Viewport) -> Result<Self, ConfigError> {
        config.validate()?;
        let glyphs = GlyphSource::new(&config.alphabet).map_err(ConfigError::Alphabet)?;
        let mut rng = XorShift64::new(config.seed);
        let size = GridSize::for_viewport(viewport, config.cell_size);
        let grid = GridStore::build(size, &glyphs, &mut rng, config.base_color);

        glyphfield_core::info!(
            rows = size.rows,
            cols = size.cols,
            cell_size = config.cell_size,
            "glyphfield engine started"
        );

        Ok(Self {
            renderer: Renderer::new(config.cell_size),
            cadence: ScrambleCadence::new(config.scramble_interval),
            resize: ResizeDebouncer::new(config.resize_debounce),
            config,
            glyphs,
            rng,
            viewport,
            grid,
            dirty: DirtySet::new(),
            pointer: PointerTracker::new(),
            retired: Vec::new(),
            needs_full_draw: true,
            running: true,
            stats: EngineStats {
                rebuilds: 1,
                ..EngineStats::default()
            },
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Viewport the current grid was built for.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The grid store.
    pub fn grid(&self) -> &GridStore {
        &self.grid
    }

    /// The dirty set.
    pub fn dirty(&self) -> &DirtySet {
        &self.dirty
    }

    /// Cell currently under the pointer, if tracked.
    pub fn pointer_cell(&self) -> Option<GridPos> {
        self.pointer.tracked()
    }

    /// Whether a resize is waiting for its debounce deadline.
    pub fn resize_pending(&self) -> bool {
        self.resize.is_pending()
    }

    /// Cumulative counters.
    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    /// Whether the loop is still running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the loop. Later frames do nothing and report `keep_running == false`.
    pub fn stop(&mut self) {
        if self.running {
            glyphfield_core::info!("glyphfield engine stopped");
        }
        self.running = false;
        self.resize.cancel();
    }

    /// Dispatch a host event.
    ///
    /// Returns the number of cells activated (always 0 for non-move events).
    pub fn handle_event(&mut self, event: Event, now: Duration) -> usize {
        match event {
            Event::Pointer(PointerEvent::Moved { x, y }) => self.pointer_moved(x, y),
            Event::Pointer(PointerEvent::Left) => {
                self.pointer_left();
                0
            }
            Event::Resize(viewport) => {
                self.handle_resize(viewport, now);
                0
            }
        }
    }

    /// Pointer moved to `(x, y)` in viewport pixels.
    ///
    /// When the pointer enters a new cell, every idle cell in the surrounding
    /// block is activated. Returns the number of cells activated.
    pub fn pointer_moved(&mut self, x: f64, y: f64) -> usize {
        if !self.running {
            return 0;
        }
        let Some(center) = self.pointer.moved(x, y, self.config.cell_size) else {
            return 0;
        };
        glyphfield_core::debug!(row = center.0, col = center.1, "pointer entered cell");
        self.activate_block(center)
    }

    /// Pointer left the surface. Animations in flight run to completion.
    pub fn pointer_left(&mut self) {
        self.pointer.left();
    }

    /// Activate the configured neighborhood around `center`.
    pub fn activate_block(&mut self, center: GridPos) -> usize {
        let size = self.grid.size();
        pointer::neighborhood(center, self.config.hover_radius, size)
            .filter(|&coord| self.activate(coord))
            .count()
    }

    /// Activate a single cell. Only idle, in-bounds cells accept.
    pub fn activate(&mut self, coord: CellCoord) -> bool {
        let Some(cell) = self.grid.get_mut(coord) else {
            return false;
        };
        if !cell.state().is_idle() {
            return false;
        }
        let ticks = self
            .config
            .scramble_ticks_base
            .saturating_add(self.rng.up_to(self.config.scramble_ticks_jitter));
        cell.activate(ticks, self.config.hover_color);
        self.dirty.insert(coord);
        self.stats.activations += 1;
        true
    }

    /// Schedule a rebuild for `viewport` after the debounce delay.
    ///
    /// A newer resize replaces a pending one.
    pub fn handle_resize(&mut self, viewport: Viewport, now: Duration) {
        if !self.running {
            return;
        }
        if self.resize.schedule(viewport, now) {
            glyphfield_core::debug!(
                width = viewport.width,
                height = viewport.height,
                "pending resize replaced"
            );
        } else {
            glyphfield_core::debug!(
                width = viewport.width,
                height = viewport.height,
                "resize scheduled"
            );
        }
    }

    /// Rebuild the grid for `viewport` immediately.
    ///
    /// Every cell is replaced by a fresh idle cell, the dirty set is emptied,
    /// and pointer tracking is reset. The next frame performs a full draw.
    pub fn rebuild(&mut self, viewport: Viewport) {
        let size = GridSize::for_viewport(viewport, self.config.cell_size);
        self.viewport = viewport;
        self.grid = GridStore::build(size, &self.glyphs, &mut self.rng, self.config.base_color);
        self.dirty.clear();
        self.retired.clear();
        self.pointer.left();
        self.needs_full_draw = true;
        self.stats.rebuilds += 1;
        glyphfield_core::info!(rows = size.rows, cols = size.cols, "grid rebuilt");
    }

    /// Clear `surface` and draw the whole grid now.
    ///
    /// Hosts call this after their surface lost its contents (for example a
    /// canvas backing store resize). The frame loop calls it after rebuilds.
    pub fn full_draw<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.renderer.full_draw(surface, &self.grid);
        self.needs_full_draw = false;
    }

    /// Process one display frame at `now`.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S, now: Duration) -> FrameOutcome {
        if !self.running {
            return FrameOutcome::default();
        }

        let mut outcome = FrameOutcome {
            keep_running: true,
            ..FrameOutcome::default()
        };

        if let Some(viewport) = self.resize.poll(now) {
            self.rebuild(viewport);
            outcome.rebuilt = true;
        }
        if self.needs_full_draw {
            self.full_draw(surface);
        }

        let scramble_due = self.cadence.begin_frame(now);
        outcome.scramble_frame = scramble_due;

        let ctx = FrameContext {
            now,
            scramble_due,
            settle_duration: self.config.settle_duration,
            easing: self.config.settle_easing,
            base: self.config.base_color,
            hover: self.config.hover_color,
            glyphs: &self.glyphs,
        };

        self.retired.clear();
        for coord in self.dirty.iter() {
            let Some(cell) = self.grid.get_mut(coord) else {
                // Stale coordinate from a grid that no longer exists.
                self.retired.push(coord);
                continue;
            };
            let step = cell.advance(&ctx, &mut self.rng);
            if step.redraw {
                self.renderer.draw_cell(surface, coord, cell);
                outcome.cells_drawn += 1;
            }
            if step.retire {
                self.retired.push(coord);
            }
        }
        outcome.cells_retired = self.dirty.remove_all(self.retired.drain(..));
        outcome.active_cells = self.dirty.len();

        self.stats.frames += 1;
        self.stats.scramble_frames += u64::from(scramble_due);
        self.stats.cells_drawn += outcome.cells_drawn as u64;

        if outcome.cells_drawn > 0 || outcome.cells_retired > 0 {
            glyphfield_core::trace!(
                drawn = outcome.cells_drawn,
                retired = outcome.cells_retired,
                active = outcome.active_cells,
                scramble = scramble_due,
                "frame"
            );
        }
        outcome
    }

    /// Cell at `coord` in the current grid.
    pub fn cell(&self, coord: CellCoord) -> Option<&Cell> {
        self.grid.get(coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphfield_render::buffer::GlyphBuffer;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    /// 180×180 px with 20 px cells → 10×10 grid.
    fn engine() -> Engine {
        Engine::new(EngineConfig::default(), Viewport::new(180, 180)).unwrap()
    }

    fn surface(engine: &Engine) -> GlyphBuffer {
        let size = engine.grid().size();
        GlyphBuffer::new(size.cols, size.rows, u32::from(engine.config().cell_size))
    }

    #[test]
    fn new_rejects_invalid_config() {
        let err = Engine::new(EngineConfig::default().cell_size(0), Viewport::new(10, 10));
        assert_eq!(err.unwrap_err(), ConfigError::ZeroCellSize);
    }

    #[test]
    fn initial_grid_matches_viewport() {
        let engine = engine();
        assert_eq!(engine.grid().size(), GridSize::new(10, 10));
        assert!(engine.dirty().is_empty());
        assert_eq!(engine.stats().rebuilds, 1);
    }

    #[test]
    fn first_frame_full_draws_once() {
        let mut engine = engine();
        let mut surface = surface(&engine);
        engine.frame(&mut surface, ms(0));
        engine.frame(&mut surface, ms(16));
        assert_eq!(surface.stats().full_clears, 1);
        assert_eq!(surface.stats().glyph_fills, 100);
    }

    #[test]
    fn pointer_activates_block() {
        let mut engine = engine();
        let activated = engine.pointer_moved(110.0, 110.0);
        assert_eq!(activated, 9);
        assert_eq!(engine.dirty().len(), 9);
        assert_eq!(engine.stats().activations, 9);
    }

    #[test]
    fn same_cell_move_does_not_reactivate() {
        let mut engine = engine();
        engine.pointer_moved(110.0, 110.0);
        assert_eq!(engine.pointer_moved(115.0, 101.0), 0);
        assert_eq!(engine.stats().activations, 9);
    }

    #[test]
    fn jitter_bounds_tick_count() {
        let mut engine = engine();
        engine.pointer_moved(110.0, 110.0);
        let cfg = engine.config().clone();
        for coord in engine.dirty().iter() {
            let ticks = engine.cell(coord).unwrap().remaining_scramble_ticks().unwrap();
            assert!(ticks >= cfg.scramble_ticks_base);
            assert!(ticks <= cfg.scramble_ticks_base + cfg.scramble_ticks_jitter);
        }
    }

    #[test]
    fn stopped_engine_does_nothing() {
        let mut engine = engine();
        let mut surface = surface(&engine);
        engine.stop();
        assert!(!engine.is_running());
        let outcome = engine.frame(&mut surface, ms(0));
        assert!(!outcome.keep_running);
        assert_eq!(surface.stats().full_clears, 0);
        assert_eq!(engine.pointer_moved(50.0, 50.0), 0);
    }

    #[test]
    fn handle_event_dispatches() {
        let mut engine = engine();
        assert_eq!(
            engine.handle_event(PointerEvent::moved(30.0, 30.0).into(), ms(0)),
            9
        );
        engine.handle_event(PointerEvent::Left.into(), ms(1));
        assert_eq!(engine.pointer_cell(), None);
        engine.handle_event(Viewport::new(40, 40).into(), ms(2));
        assert!(engine.resize_pending());
    }

    #[test]
    fn stale_coordinate_is_dropped() {
        let mut engine = engine();
        let mut surface = surface(&engine);
        engine.dirty.insert(CellCoord::new(500, 500));
        let outcome = engine.frame(&mut surface, ms(0));
        assert_eq!(outcome.cells_retired, 1);
        assert!(engine.dirty().is_empty());
    }

    #[test]
    fn activity_settles_back_to_idle() {
        let mut engine = engine();
        let mut surface = surface(&engine);
        engine.pointer_moved(110.0, 110.0);
        let mut now = 0;
        while !engine.dirty().is_empty() {
            engine.frame(&mut surface, ms(now));
            now += 16;
            assert!(now < 5_000, "animation never finished");
        }
        assert_eq!(engine.grid().animating_count(), 0);
        let base = engine.config().base_color;
        assert!(engine.grid().iter().all(|(_, c)| c.color() == base));
    }
}
