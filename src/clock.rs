//! Clock seam for the wait primitive
//!
//! The engine only ever asks "what time is it" and "block for this long",
//! so the whole scheduling surface fits in one small trait. Injecting it
//! keeps the retry loops testable with virtual time instead of wall-clock
//! sleeps.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Time source and sleep facility used by the engine's bounded waits.
///
/// Implementations are synchronous: `sleep` blocks the calling thread.
/// There are no background timers and no cancellation, matching the
/// engine's blocking execution model.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> Instant;

    /// Block the calling thread for `duration`.
    fn sleep(&self, duration: Duration);
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration);
    }
}

/// Wall-clock implementation backed by `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Virtual clock where `sleep` advances time instantly.
///
/// Lets callers exercise retry wiring deterministically and without
/// wall-clock delays; the engine's own tests run on it too.
#[derive(Debug)]
pub struct ManualClock {
    base: Instant,
    offset: Mutex<Duration>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    /// Total virtual time slept so far.
    pub fn elapsed(&self) -> Duration {
        *self.offset.lock()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + *self.offset.lock()
    }

    fn sleep(&self, duration: Duration) {
        *self.offset.lock() += duration;
    }
}
