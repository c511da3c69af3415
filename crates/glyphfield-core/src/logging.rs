#![forbid(unsafe_code)]

//! Logging facade for the glyphfield crates.
//!
//! With the `tracing` feature the `tracing` macros are re-exported, so engine
//! and host code can write `glyphfield_core::debug!(rows, cols, "rebuilt")`
//! unconditionally. Without the feature every macro expands to nothing and
//! its arguments are never evaluated, which keeps the per-frame path free of
//! formatting work.
//!
//! Levels used across the workspace:
//!
//! | Level   | Emitted for |
//! |---------|-------------|
//! | `info`  | engine start/stop, grid rebuilds |
//! | `debug` | resize scheduling, pointer cell changes |
//! | `trace` | per-frame summaries (active cells, draws) |
//! | `warn`  | host-level surface problems |

#[cfg(feature = "tracing")]
pub use tracing::{debug, info, trace, warn};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op `debug!` when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op `info!` when tracing is disabled.
    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {};
    }

    /// No-op `trace!` when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// No-op `warn!` when tracing is disabled.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }
}
