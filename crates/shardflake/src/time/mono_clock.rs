use crate::{SystemClock, TimeSource};
use core::time::Duration;
use std::time::Instant;

/// A monotonic time source anchored to the wall clock once, at construction.
///
/// The clock captures `SystemTime::now()` and `Instant::now()` together and
/// from then on reports the anchor plus the monotonic time elapsed since.
/// Wall-clock adjustments made after construction (e.g., NTP or daylight
/// savings changes) are ignored, so readings never go backward.
///
/// Unlike a ticker thread, the reading has the full resolution of [`Instant`],
/// which microsecond timestamp units need.
///
/// # Example
///
/// ```
/// use shardflake::{MonotonicClock, TimeSource};
///
/// let clock = MonotonicClock::new();
/// let a = clock.now();
/// let b = clock.now();
/// assert!(b >= a);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    start: Instant,
    anchor: Duration, // since the UNIX epoch
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    /// Anchors a new clock to the current wall-clock time.
    pub fn new() -> Self {
        Self::with_anchor(SystemClock.now())
    }

    /// Anchors a new clock so that it reads `anchor` right now.
    ///
    /// Useful for replaying a fixed starting point while still letting time
    /// advance naturally.
    pub fn with_anchor(anchor: Duration) -> Self {
        Self {
            start: Instant::now(),
            anchor,
        }
    }
}

impl TimeSource for MonotonicClock {
    fn now(&self) -> Duration {
        self.anchor + self.start.elapsed()
    }
}
