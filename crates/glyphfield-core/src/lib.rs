#![forbid(unsafe_code)]

//! Core: geometry, easing, host events, resize debouncing, and deterministic randomness.

pub mod animation;
pub mod debounce;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod rng;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, info, trace, warn};
