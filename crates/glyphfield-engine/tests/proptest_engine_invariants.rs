//! Property-based invariant tests for the engine.
//!
//! 1. After every frame a coordinate is dirty iff its cell is not idle.
//! 2. An idle cell has no original glyph; an animating one always does.
//! 3. Scrambling ends after exactly `n` scramble frames, whatever the
//!    render cadence.
//! 4. A settling cell's color moves monotonically toward base and reaches it
//!    exactly within `settle_duration`.
//! 5. Activity always drains: with no further input the dirty set empties.

use std::time::Duration;

use glyphfield_core::geometry::{CellCoord, Viewport};
use glyphfield_engine::{CellState, Engine, EngineConfig};
use glyphfield_render::buffer::GlyphBuffer;
use glyphfield_render::color::Rgb;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Input {
    Move(f64, f64),
    Leave,
    Frame(u64),
}

fn input() -> impl Strategy<Value = Input> {
    prop_oneof![
        4 => (-40.0f64..260.0, -40.0f64..260.0).prop_map(|(x, y)| Input::Move(x, y)),
        1 => Just(Input::Leave),
        6 => (1u64..80).prop_map(Input::Frame),
    ]
}

fn setup(config: EngineConfig) -> (Engine, GlyphBuffer) {
    let engine = Engine::new(config, Viewport::new(180, 180)).unwrap();
    let size = engine.grid().size();
    let surface = GlyphBuffer::new(size.cols, size.rows, 20);
    (engine, surface)
}

fn check_membership(engine: &Engine) -> Result<(), TestCaseError> {
    for (coord, cell) in engine.grid().iter() {
        prop_assert_eq!(engine.dirty().contains(coord), !cell.state().is_idle());
        prop_assert_eq!(cell.state().is_idle(), cell.original_symbol().is_none());
    }
    prop_assert_eq!(engine.dirty().len(), engine.grid().animating_count());
    Ok(())
}

/// Per-channel distance from `color` to `target`.
fn distance(color: Rgb, target: Rgb) -> u32 {
    let d = |a: u8, b: u8| u32::from(a.abs_diff(b));
    d(color.r, target.r) + d(color.g, target.g) + d(color.b, target.b)
}

proptest! {
    #[test]
    fn dirty_set_tracks_animating_cells(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input(), 1..120),
    ) {
        let (mut engine, mut surface) = setup(EngineConfig::default().seed(seed));
        let mut now = 0u64;
        for step in inputs {
            match step {
                Input::Move(x, y) => {
                    engine.pointer_moved(x, y);
                }
                Input::Leave => engine.pointer_left(),
                Input::Frame(dt) => {
                    now += dt;
                    engine.frame(&mut surface, Duration::from_millis(now));
                }
            }
            check_membership(&engine)?;
        }
    }

    #[test]
    fn scrambling_ends_after_n_scramble_frames(
        ticks in 1u32..12,
        frame_ms in 1u64..120,
    ) {
        let config = EngineConfig::default().scramble_ticks(ticks, 0);
        let (mut engine, mut surface) = setup(config);
        engine.pointer_moved(90.0, 90.0);
        let coord = CellCoord::new(4, 4);

        let mut now = 0u64;
        let mut scramble_frames = 0u32;
        while matches!(engine.cell(coord).unwrap().state(), CellState::Scrambling { .. }) {
            let outcome = engine.frame(&mut surface, Duration::from_millis(now));
            scramble_frames += u32::from(outcome.scramble_frame);
            now += frame_ms;
            prop_assert!(scramble_frames <= ticks);
        }
        prop_assert_eq!(scramble_frames, ticks);
    }

    #[test]
    fn settle_converges_monotonically(
        settle_ms in 16u64..2_000,
        frame_ms in 1u64..100,
        hover in any::<(u8, u8, u8)>(),
    ) {
        let base = Rgb::new(0x1f, 0x2a, 0x36);
        let hover = Rgb::new(hover.0, hover.1, hover.2);
        let config = EngineConfig::default()
            .scramble_ticks(1, 0)
            .settle_duration(Duration::from_millis(settle_ms))
            .colors(base, hover);
        let (mut engine, mut surface) = setup(config);
        engine.pointer_moved(90.0, 90.0);
        let coord = CellCoord::new(4, 4);

        // First frame is a scramble frame: one tick, straight into settling.
        engine.frame(&mut surface, Duration::ZERO);
        let start = engine.cell(coord).unwrap().settle_start();
        prop_assert_eq!(start, Some(Duration::ZERO));

        let mut last = distance(engine.cell(coord).unwrap().color(), base);
        let mut now = 0u64;
        while !engine.cell(coord).unwrap().state().is_idle() {
            now += frame_ms;
            engine.frame(&mut surface, Duration::from_millis(now));
            let d = distance(engine.cell(coord).unwrap().color(), base);
            prop_assert!(d <= last, "color moved away from base: {} -> {}", last, d);
            last = d;
        }
        prop_assert_eq!(engine.cell(coord).unwrap().color(), base);
        // Idle on the first frame at or past the settle deadline.
        prop_assert!(now >= settle_ms);
        prop_assert!(now < settle_ms + frame_ms);
    }

    #[test]
    fn activity_always_drains(
        seed in any::<u64>(),
        moves in prop::collection::vec((0.0f64..180.0, 0.0f64..180.0), 1..30),
    ) {
        let (mut engine, mut surface) = setup(EngineConfig::default().seed(seed));
        for (x, y) in moves {
            engine.pointer_moved(x, y);
        }
        let config = engine.config().clone();
        let max_ticks = u64::from(config.scramble_ticks_base + config.scramble_ticks_jitter);
        // Scramble frames land on the first 16 ms frame past each interval.
        let per_tick = (config.scramble_interval.as_millis() as u64).div_ceil(16) * 16;
        let bound = max_ticks * per_tick + config.settle_duration.as_millis() as u64 + 16;

        let mut now = 0u64;
        while !engine.dirty().is_empty() {
            engine.frame(&mut surface, Duration::from_millis(now));
            now += 16;
            prop_assert!(now <= bound + 16, "still animating at {}ms", now);
        }
        prop_assert_eq!(engine.grid().animating_count(), 0);
    }
}
