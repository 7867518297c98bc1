//! Non-blocking blink timer
//!
//! Compares a free-running millisecond tick against the time of the last
//! toggle. Arithmetic wraps, so the timer keeps working when the tick
//! rolls over `u32::MAX`.

use crate::config::DEFAULT_BLINK_INTERVAL_MS;

/// Interval timer for the blinking output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkTimer {
    interval_ms: u32,
    last_toggle_ms: u32,
}

impl Default for BlinkTimer {
    fn default() -> Self {
        Self::new(DEFAULT_BLINK_INTERVAL_MS)
    }
}

impl BlinkTimer {
    /// Create a timer with the given interval
    pub const fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_toggle_ms: 0,
        }
    }

    /// Time between toggles
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Start a new interval at `now_ms`
    pub fn restart(&mut self, now_ms: u32) {
        self.last_toggle_ms = now_ms;
    }

    /// Time elapsed since the last toggle
    pub fn elapsed(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.last_toggle_ms)
    }

    /// Check whether the interval has elapsed
    pub fn due(&self, now_ms: u32) -> bool {
        self.elapsed(now_ms) >= self.interval_ms
    }

    /// Time left until the next toggle (0 if already due)
    pub fn remaining(&self, now_ms: u32) -> u32 {
        self.interval_ms.saturating_sub(self.elapsed(now_ms))
    }

    /// If due, record a toggle at `now_ms` and return true
    pub fn poll(&mut self, now_ms: u32) -> bool {
        if self.due(now_ms) {
            self.last_toggle_ms = now_ms;
            true
        } else {
            false
        }
    }
}
