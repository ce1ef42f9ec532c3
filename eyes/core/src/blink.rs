//! Idle auto-blink policy
//!
//! While idle, the eyes blink on their own once `min_interval_ms` plus a
//! random extra delay has passed since the last animation. The extra delay is
//! drawn uniformly from `0..=jitter_ms` each time the policy is armed, which
//! happens when the engine settles into idle and whenever the policy is
//! reconfigured. A blink therefore never fires before the minimum.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default minimum time between idle blinks
pub const DEFAULT_BLINK_MIN_MS: u16 = 5_000;

/// Default upper bound of the random extra delay
pub const DEFAULT_BLINK_JITTER_MS: u16 = 3_000;

/// Decides when an idle engine should blink
#[derive(Debug)]
pub struct BlinkPolicy {
    enabled: bool,
    min_interval_ms: u16,
    jitter_ms: u16,
    threshold_ms: u32,
    rng: StdRng,
}

impl BlinkPolicy {
    /// Policy with entropy-seeded jitter
    #[must_use]
    pub fn new(enabled: bool, min_interval_ms: u16, jitter_ms: u16) -> Self {
        Self::with_rng(enabled, min_interval_ms, jitter_ms, StdRng::from_entropy())
    }

    /// Policy with reproducible jitter
    #[must_use]
    pub fn seeded(enabled: bool, min_interval_ms: u16, jitter_ms: u16, seed: u64) -> Self {
        Self::with_rng(
            enabled,
            min_interval_ms,
            jitter_ms,
            StdRng::seed_from_u64(seed),
        )
    }

    fn with_rng(enabled: bool, min_interval_ms: u16, jitter_ms: u16, rng: StdRng) -> Self {
        let mut policy = Self {
            enabled,
            min_interval_ms,
            jitter_ms,
            threshold_ms: u32::from(min_interval_ms),
            rng,
        };
        policy.arm();
        policy
    }

    /// Draw a fresh extra delay for the next idle period
    pub fn arm(&mut self) {
        let jitter = if self.jitter_ms == 0 {
            0
        } else {
            self.rng.gen_range(0..=u32::from(self.jitter_ms))
        };
        self.threshold_ms = u32::from(self.min_interval_ms) + jitter;
    }

    /// Whether a blink is due after `idle_ms` without animation
    #[must_use]
    pub fn is_due(&self, idle_ms: u32) -> bool {
        self.enabled && idle_ms >= self.threshold_ms
    }

    /// Turn auto-blink on or off
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether auto-blink is on
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set the minimum idle time before a blink
    pub fn set_min_interval(&mut self, min_interval_ms: u16) {
        self.min_interval_ms = min_interval_ms;
        self.arm();
    }

    /// Set the upper bound of the random extra delay
    pub fn set_jitter(&mut self, jitter_ms: u16) {
        self.jitter_ms = jitter_ms;
        self.arm();
    }

    /// Minimum idle time before a blink
    #[must_use]
    pub fn min_interval_ms(&self) -> u16 {
        self.min_interval_ms
    }

    /// Upper bound of the random extra delay
    #[must_use]
    pub fn jitter_ms(&self) -> u16 {
        self.jitter_ms
    }

    /// Idle time after which the current period blinks
    #[must_use]
    pub fn threshold_ms(&self) -> u32 {
        self.threshold_ms
    }
}

impl Default for BlinkPolicy {
    fn default() -> Self {
        Self::new(true, DEFAULT_BLINK_MIN_MS, DEFAULT_BLINK_JITTER_MS)
    }
}
