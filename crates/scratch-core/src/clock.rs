//! Monotonic time source for completion-check throttling

use std::time::{Duration, Instant};

/// Monotonic clock measured from an arbitrary origin
pub trait Clock: Send + Sync {
    /// Time elapsed since the clock's origin
    fn now(&self) -> Duration;
}

/// Wall clock anchored at construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create clock anchored now
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Rate limiter: admits one call per window, unless forced
#[derive(Debug, Clone, Copy)]
pub(crate) struct Throttle {
    window: Duration,
    last: Option<Duration>,
}

impl Throttle {
    pub(crate) fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// Returns whether the call at `now` may proceed, recording it if so
    pub(crate) fn admit(&mut self, now: Duration, force: bool) -> bool {
        let open = force
            || self
                .last
                .map_or(true, |last| now.saturating_sub(last) >= self.window);
        if open {
            self.last = Some(now);
        }
        open
    }
}
