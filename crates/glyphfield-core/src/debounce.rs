#![forbid(unsafe_code)]

//! Resize debouncing.
//!
//! Browsers and terminals deliver resize notifications in bursts while the
//! user drags a window edge. Rebuilding the grid on each one would discard
//! and redraw every cell many times per second, so resizes are deferred by a
//! fixed delay and every newer resize replaces the pending one.
//!
//! # Invariants
//!
//! - **Latest-wins**: the last viewport in a burst is the one applied.
//! - **At most one apply per burst**: a pending resize is cleared when applied.
//! - **Deterministic**: time is supplied by the caller; identical call
//!   sequences yield identical results.
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use glyphfield_core::debounce::ResizeDebouncer;
//! use glyphfield_core::geometry::Viewport;
//!
//! let mut debouncer = ResizeDebouncer::new(Duration::from_millis(150));
//! debouncer.schedule(Viewport::new(800, 600), Duration::from_millis(0));
//! debouncer.schedule(Viewport::new(820, 600), Duration::from_millis(40));
//!
//! // Deadline is measured from the newest resize.
//! assert_eq!(debouncer.poll(Duration::from_millis(150)), None);
//! assert_eq!(
//!     debouncer.poll(Duration::from_millis(190)),
//!     Some(Viewport::new(820, 600))
//! );
//! assert_eq!(debouncer.poll(Duration::from_millis(400)), None);
//! ```

use std::time::Duration;

use crate::geometry::Viewport;

/// A resize waiting for its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingResize {
    viewport: Viewport,
    deadline: Duration,
}

/// Deferred, cancel-on-newer resize scheduling.
///
/// Not thread-safe; owned by the single event/frame loop.
#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    delay: Duration,
    pending: Option<PendingResize>,
    superseded: u64,
}

impl ResizeDebouncer {
    /// Create a debouncer with the given delay.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            superseded: 0,
        }
    }

    /// Configured delay.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `viewport` to apply `delay` after `now`, replacing any pending resize.
    ///
    /// Returns `true` if a pending resize was superseded.
    pub fn schedule(&mut self, viewport: Viewport, now: Duration) -> bool {
        let replaced = self.pending.is_some();
        if replaced {
            self.superseded += 1;
        }
        self.pending = Some(PendingResize {
            viewport,
            deadline: now.saturating_add(self.delay),
        });
        replaced
    }

    /// Take the pending viewport if its deadline has passed.
    pub fn poll(&mut self, now: Duration) -> Option<Viewport> {
        match self.pending {
            Some(pending) if now >= pending.deadline => {
                self.pending = None;
                Some(pending.viewport)
            }
            _ => None,
        }
    }

    /// Whether a resize is waiting.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop any pending resize without applying it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Number of resizes replaced before they could apply.
    #[must_use]
    pub const fn superseded(&self) -> u64 {
        self.superseded
    }
}
