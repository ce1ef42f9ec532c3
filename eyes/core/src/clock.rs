//! Millisecond clock capability
//!
//! The engine reads time through the [`Clock`] trait as a 32-bit millisecond
//! counter that is allowed to roll over. All interval checks go through
//! [`elapsed_ms`], which subtracts with wraparound so a rollover between two
//! readings still yields the true distance.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic millisecond counter
pub trait Clock {
    /// Current counter value; wraps at `u32::MAX`
    fn now_ms(&self) -> u32;
}

/// Milliseconds from `since` to `now`, tolerating counter rollover
#[must_use]
pub const fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

/// Wall clock backed by [`Instant`]
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Start counting from now
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
    #[allow(clippy::cast_possible_truncation)]
    fn now_ms(&self) -> u32 {
        // Truncation is the rollover.
        self.origin.elapsed().as_millis() as u32
    }
}

/// Manually driven clock
///
/// Clones share the same counter, so a test can hand one clone to the engine
/// and keep another to move time forward.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<u32>>,
}

impl ManualClock {
    /// Clock reading `start`
    #[must_use]
    pub fn starting_at(start: u32) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    /// Move the counter forward, wrapping at `u32::MAX`
    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }

    /// Set the counter
    pub fn set(&self, ms: u32) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}
