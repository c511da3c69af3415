#![forbid(unsafe_code)]

//! Deterministic xorshift64 PRNG.
//!
//! Glyph draws and scramble jitter only need to look random; they do not need
//! cryptographic quality. A seeded generator makes every frame reproducible
//! in tests and trace replays.

/// Fallback state for a zero seed (xorshift is stuck at zero).
const ZERO_SEED_STATE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Small, fast, seedable pseudo-random generator.
#[derive(Debug, Clone)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    /// Create a generator from `seed`. A zero seed is remapped to a fixed non-zero state.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { ZERO_SEED_STATE } else { seed },
        }
    }

    /// Next raw 64-bit value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform-ish value in `0..bound`. Returns 0 when `bound == 0`.
    #[inline]
    pub fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        // Take the high bits; the low bits of xorshift are weakest.
        ((self.next_u64() >> 32) % u64::from(bound)) as u32
    }

    /// Value in `0..=max`.
    #[inline]
    pub fn up_to(&mut self, max: u32) -> u32 {
        match max.checked_add(1) {
            Some(bound) => self.below(bound),
            None => (self.next_u64() >> 32) as u32,
        }
    }
}

impl Default for XorShift64 {
    fn default() -> Self {
        Self::new(ZERO_SEED_STATE)
    }
}
