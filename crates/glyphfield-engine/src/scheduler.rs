#![forbid(unsafe_code)]

//! Scramble cadence.
//!
//! The host calls the engine once per display frame (render cadence). The
//! scramble cadence rides on top of it: a frame is a *scramble frame* when at
//! least `interval` has passed since the previous scramble frame. Only
//! scramble frames advance scrambling cells, which gives the deliberately
//! choppy flicker; settling cells update on every frame.

use std::time::Duration;

/// Throttle deciding which frames are scramble frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrambleCadence {
    interval: Duration,
    last: Option<Duration>,
}

impl ScrambleCadence {
    /// Create a cadence firing at most once per `interval`.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Timestamp of the last scramble frame.
    #[inline]
    pub const fn last(&self) -> Option<Duration> {
        self.last
    }

    /// Decide whether the frame at `now` is a scramble frame, recording it if so.
    ///
    /// The first frame ever is always a scramble frame. A clock that went
    /// backwards re-arms the cadence at `now`.
    pub fn begin_frame(&mut self, now: Duration) -> bool {
        let due = match self.last {
            None => true,
            Some(last) if now < last => true,
            Some(last) => now - last >= self.interval,
        };
        if due {
            self.last = Some(now);
        }
        due
    }
}
