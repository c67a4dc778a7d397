//! Time source and timing policy for the card reader.
//!
//! Card hold timeouts are measured against a [`Clock`] so tests can move
//! time forward with [`ManualClock`] instead of sleeping.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// A presented card is released automatically after this long.
pub const CARD_HOLD_TIMEOUT: Duration = Duration::from_secs(10);

/// Period of the background keypad scan.
pub const KEYPAD_POLL_INTERVAL: Duration = Duration::from_millis(7);

/// Monotonic time source.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock backed by `Instant::now`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
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

    pub fn advance(&self, by: Duration) {
        *self.offset.lock() += by;
    }

    pub fn elapsed(&self) -> Duration {
        *self.offset.lock()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + *self.offset.lock()
    }
}
