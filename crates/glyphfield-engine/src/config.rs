#![forbid(unsafe_code)]

//! Engine configuration.
//!
//! All fields are public with sensible defaults; builder-style setters cover
//! the common overrides. [`EngineConfig::validate`] runs before an engine is
//! built, so the animation paths themselves never fail.
//!
//! With the `serde` feature the config deserializes from JSON. Durations are
//! written in milliseconds and colors as `#rrggbb`; missing fields keep their
//! defaults:
//!
//! ```json
//! { "cell_size": 24, "settle_duration": 800, "hover_color": "#ff3366" }
//! ```

use core::fmt;
use std::time::Duration;

use glyphfield_core::animation::Easing;
use glyphfield_render::color::Rgb;
use glyphfield_render::glyph::{AlphabetError, GlyphSource};

/// Largest accepted neighborhood half-width.
pub const MAX_HOVER_RADIUS: u16 = 8;

/// Tunables for an [`Engine`](crate::engine::Engine).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Edge length of a square cell in logical pixels.
    pub cell_size: u16,
    /// Period of the scramble cadence.
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub scramble_interval: Duration,
    /// Scramble ticks every activation gets.
    pub scramble_ticks_base: u32,
    /// Extra ticks drawn uniformly from `0..=scramble_ticks_jitter`.
    pub scramble_ticks_jitter: u32,
    /// Length of the hover-to-base color fade.
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub settle_duration: Duration,
    /// Curve applied to settle progress.
    pub settle_easing: Easing,
    /// Delay before a resize rebuilds the grid.
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub resize_debounce: Duration,
    /// Neighborhood half-width around the pointer cell (1 = 3×3).
    pub hover_radius: u16,
    /// Resting color.
    pub base_color: Rgb,
    /// Color of a freshly activated cell.
    pub hover_color: Rgb,
    /// Glyphs drawn while scrambling and at (re)build.
    pub alphabet: String,
    /// Seed for glyph draws and tick jitter.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cell_size: 20,
            scramble_interval: Duration::from_millis(50),
            scramble_ticks_base: 6,
            scramble_ticks_jitter: 4,
            settle_duration: Duration::from_millis(600),
            settle_easing: Easing::EaseOutCubic,
            resize_debounce: Duration::from_millis(150),
            hover_radius: 1,
            base_color: Rgb::new(0x1f, 0x2a, 0x36),
            hover_color: Rgb::new(0x00, 0xff, 0xa3),
            alphabet: GlyphSource::DEFAULT_ALPHABET.to_string(),
            seed: 0x9E37_79B9_7F4A_7C15,
        }
    }
}

impl EngineConfig {
    /// Set the cell size.
    #[must_use]
    pub fn cell_size(mut self, px: u16) -> Self {
        self.cell_size = px;
        self
    }

    /// Set the scramble cadence period.
    #[must_use]
    pub fn scramble_interval(mut self, interval: Duration) -> Self {
        self.scramble_interval = interval;
        self
    }

    /// Set base tick count and jitter.
    #[must_use]
    pub fn scramble_ticks(mut self, base: u32, jitter: u32) -> Self {
        self.scramble_ticks_base = base;
        self.scramble_ticks_jitter = jitter;
        self
    }

    /// Set the settle fade length.
    #[must_use]
    pub fn settle_duration(mut self, duration: Duration) -> Self {
        self.settle_duration = duration;
        self
    }

    /// Set the resize debounce delay.
    #[must_use]
    pub fn resize_debounce(mut self, delay: Duration) -> Self {
        self.resize_debounce = delay;
        self
    }

    /// Set the neighborhood half-width.
    #[must_use]
    pub fn hover_radius(mut self, radius: u16) -> Self {
        self.hover_radius = radius;
        self
    }

    /// Set base and hover tones.
    #[must_use]
    pub fn colors(mut self, base: Rgb, hover: Rgb) -> Self {
        self.base_color = base;
        self.hover_color = hover;
        self
    }

    /// Set the glyph alphabet.
    #[must_use]
    pub fn alphabet(mut self, alphabet: impl Into<String>) -> Self {
        self.alphabet = alphabet.into();
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.scramble_interval.is_zero() {
            return Err(ConfigError::ZeroScrambleInterval);
        }
        if self.scramble_ticks_base == 0 {
            return Err(ConfigError::ZeroScrambleTicks);
        }
        if self
            .scramble_ticks_base
            .checked_add(self.scramble_ticks_jitter)
            .is_none()
        {
            return Err(ConfigError::ScrambleTicksOverflow);
        }
        if self.settle_duration.is_zero() {
            return Err(ConfigError::ZeroSettleDuration);
        }
        if self.hover_radius > MAX_HOVER_RADIUS {
            return Err(ConfigError::HoverRadiusTooLarge(self.hover_radius));
        }
        GlyphSource::new(&self.alphabet).map_err(ConfigError::Alphabet)?;
        Ok(())
    }
}

/// Invalid configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `cell_size` is zero.
    ZeroCellSize,
    /// `scramble_interval` is zero.
    ZeroScrambleInterval,
    /// `scramble_ticks_base` is zero.
    ZeroScrambleTicks,
    /// `scramble_ticks_base + scramble_ticks_jitter` does not fit in a `u32`.
    ScrambleTicksOverflow,
    /// `settle_duration` is zero.
    ZeroSettleDuration,
    /// `hover_radius` exceeds [`MAX_HOVER_RADIUS`].
    HoverRadiusTooLarge(u16),
    /// The alphabet was rejected.
    Alphabet(AlphabetError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCellSize => write!(f, "cell_size must be at least 1"),
            Self::ZeroScrambleInterval => write!(f, "scramble_interval must be non-zero"),
            Self::ZeroScrambleTicks => write!(f, "scramble_ticks_base must be at least 1"),
            Self::ScrambleTicksOverflow => {
                write!(f, "scramble_ticks_base + scramble_ticks_jitter overflows u32")
            }
            Self::ZeroSettleDuration => write!(f, "settle_duration must be non-zero"),
            Self::HoverRadiusTooLarge(r) => {
                write!(f, "hover_radius {r} exceeds maximum {MAX_HOVER_RADIUS}")
            }
            Self::Alphabet(err) => write!(f, "alphabet: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Alphabet(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(feature = "serde")]
mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
