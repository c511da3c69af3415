#![forbid(unsafe_code)]

//! Per-cell state machine.
//!
//! ```text
//!            activate (idle only)
//!   Idle ─────────────────────────▶ Scrambling { original, remaining }
//!    ▲                                   │ scramble frame: new glyph, remaining -= 1
//!    │                                   │ remaining == 0: restore original
//!    │   settle progress reaches 1       ▼
//!    └──────────────────────────── Settling { original, started }
//!                                        every frame: color = lerp(hover, base, ease(t))
//! ```
//!
//! The original glyph lives inside the non-idle variants, so "an idle cell
//! has no original glyph" holds by construction.

use std::time::Duration;

use glyphfield_core::animation::{Easing, elapsed_since, progress};
use glyphfield_core::rng::XorShift64;
use glyphfield_render::color::Rgb;
use glyphfield_render::glyph::GlyphSource;

/// Animation state of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    /// Static glyph in the base tone.
    #[default]
    Idle,
    /// Flickering through random glyphs on the scramble cadence.
    Scrambling {
        /// Glyph to restore when the countdown ends.
        original: char,
        /// Scramble ticks left.
        remaining: u32,
    },
    /// Original glyph restored; color fading from hover to base.
    Settling {
        /// The restored glyph.
        original: char,
        /// Timestamp the fade began.
        started: Duration,
    },
}

impl CellState {
    /// Whether the cell is at rest.
    #[inline]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Inputs shared by every cell advanced within one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    /// Frame timestamp.
    pub now: Duration,
    /// Whether the scramble cadence is due this frame.
    pub scramble_due: bool,
    /// Fade length.
    pub settle_duration: Duration,
    /// Fade curve.
    pub easing: Easing,
    /// Resting tone.
    pub base: Rgb,
    /// Active tone.
    pub hover: Rgb,
    /// Glyphs to scramble through.
    pub glyphs: &'a GlyphSource,
}

/// What advancing a cell did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Step {
    /// The visible glyph or color changed (or a draw was pending).
    pub redraw: bool,
    /// The cell is idle and must leave the dirty set.
    pub retire: bool,
}

/// One grid position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    symbol: char,
    color: Rgb,
    state: CellState,
    pending_draw: bool,
}

impl Cell {
    /// An idle cell showing `symbol` in `base`.
    pub const fn new(symbol: char, base: Rgb) -> Self {
        Self {
            symbol,
            color: base,
            state: CellState::Idle,
            pending_draw: false,
        }
    }

    /// Displayed glyph.
    #[inline]
    pub const fn symbol(&self) -> char {
        self.symbol
    }

    /// Displayed color.
    #[inline]
    pub const fn color(&self) -> Rgb {
        self.color
    }

    /// Current state.
    #[inline]
    pub const fn state(&self) -> CellState {
        self.state
    }

    /// Glyph to restore; `Some` only while scrambling or settling.
    #[inline]
    pub const fn original_symbol(&self) -> Option<char> {
        match self.state {
            CellState::Idle => None,
            CellState::Scrambling { original, .. } | CellState::Settling { original, .. } => {
                Some(original)
            }
        }
    }

    /// Scramble ticks left, if scrambling.
    #[inline]
    pub const fn remaining_scramble_ticks(&self) -> Option<u32> {
        match self.state {
            CellState::Scrambling { remaining, .. } => Some(remaining),
            _ => None,
        }
    }

    /// Settle start time, if settling.
    #[inline]
    pub const fn settle_start(&self) -> Option<Duration> {
        match self.state {
            CellState::Settling { started, .. } => Some(started),
            _ => None,
        }
    }

    /// Start scrambling with `ticks` countdown. Only idle cells accept.
    ///
    /// Returns `false` (and changes nothing) if the cell is already animating.
    pub fn activate(&mut self, ticks: u32, hover: Rgb) -> bool {
        if !self.state.is_idle() {
            return false;
        }
        self.state = CellState::Scrambling {
            original: self.symbol,
            remaining: ticks.max(1),
        };
        self.color = hover;
        self.pending_draw = true;
        true
    }

    /// Advance one frame.
    pub fn advance(&mut self, ctx: &FrameContext<'_>, rng: &mut XorShift64) -> Step {
        let pending = std::mem::take(&mut self.pending_draw);
        match self.state {
            CellState::Idle => Step {
                redraw: pending,
                retire: true,
            },
            CellState::Scrambling {
                original,
                remaining,
            } => {
                if !ctx.scramble_due {
                    return Step {
                        redraw: pending,
                        retire: false,
                    };
                }
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    self.symbol = original;
                    self.state = CellState::Settling {
                        original,
                        started: ctx.now,
                    };
                } else {
                    self.symbol = ctx.glyphs.draw(rng);
                    self.state = CellState::Scrambling {
                        original,
                        remaining,
                    };
                }
                Step {
                    redraw: true,
                    retire: false,
                }
            }
            CellState::Settling { started, .. } => {
                let t = progress(elapsed_since(started, ctx.now), ctx.settle_duration);
                if t >= 1.0 {
                    self.color = ctx.base;
                    self.state = CellState::Idle;
                    return Step {
                        redraw: true,
                        retire: true,
                    };
                }
                self.color = ctx.hover.lerp(ctx.base, ctx.easing.apply(t));
                Step {
                    redraw: true,
                    retire: false,
                }
            }
        }
    }
}
