#![forbid(unsafe_code)]

//! Random glyph source.
//!
//! A [`GlyphSource`] owns a fixed alphabet and draws from it using a caller
//! supplied generator, so the source itself holds no mutable state and can
//! be shared by every cell.

use core::fmt;

use glyphfield_core::rng::XorShift64;
use unicode_width::UnicodeWidthChar;

/// Fixed alphabet of single-width glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphSource {
    glyphs: Vec<char>,
}

impl GlyphSource {
    /// Alphabet used when none is configured.
    pub const DEFAULT_ALPHABET: &'static str =
        "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()_+-=[]{}|;:,.<>?/~";

    /// Build a source from `alphabet`.
    ///
    /// Every glyph must occupy exactly one column so it centers in a square
    /// cell and maps onto one terminal cell. Duplicates are kept; they weight
    /// the draw.
    pub fn new(alphabet: &str) -> Result<Self, AlphabetError> {
        let glyphs: Vec<char> = alphabet.chars().collect();
        if glyphs.is_empty() {
            return Err(AlphabetError::Empty);
        }
        if let Some(&bad) = glyphs.iter().find(|c| c.width() != Some(1)) {
            return Err(AlphabetError::NotSingleWidth(bad));
        }
        Ok(Self { glyphs })
    }

    /// Draw a glyph.
    #[inline]
    pub fn draw(&self, rng: &mut XorShift64) -> char {
        // `glyphs` is non-empty by construction and far below u32::MAX.
        let idx = rng.below(self.glyphs.len() as u32) as usize;
        self.glyphs[idx]
    }

    /// Whether `glyph` belongs to the alphabet.
    pub fn contains(&self, glyph: char) -> bool {
        self.glyphs.contains(&glyph)
    }
}

impl Default for GlyphSource {
    fn default() -> Self {
        Self {
            glyphs: Self::DEFAULT_ALPHABET.chars().collect(),
        }
    }
}

/// Reasons an alphabet is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphabetError {
    /// No glyphs at all.
    Empty,
    /// A glyph that is zero-width, a control character, or double-width.
    NotSingleWidth(char),
}

impl fmt::Display for AlphabetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "glyph alphabet is empty"),
            Self::NotSingleWidth(c) => {
                write!(f, "glyph {c:?} (U+{:04X}) is not single-width", *c as u32)
            }
        }
    }
}

impl std::error::Error for AlphabetError {}
