//! Ripple timing: a fixed set of start timestamps feeding the water shader.
//!
//! The shader draws one expanding ring per slot. New ripples evict whichever
//! slot holds the smallest value, so sentinel slots (`-1`) fill up first and
//! after that the oldest ring is recycled.

use crate::constants::{
    MAX_RIPPLES, RIPPLE_MAX_DELAY_SEC, RIPPLE_MIN_DELAY_SEC, RIPPLE_SENTINEL,
};
use rand::Rng;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct RippleSet {
    start_times: [f32; MAX_RIPPLES],
}

impl Default for RippleSet {
    fn default() -> Self {
        Self::new()
    }
}

impl RippleSet {
    pub fn new() -> Self {
        Self {
            start_times: [RIPPLE_SENTINEL; MAX_RIPPLES],
        }
    }

    /// Record a ripple starting at `now_sec`, overwriting the slot with the
    /// smallest value. Ties resolve to the first matching slot.
    pub fn spawn(&mut self, now_sec: f32) {
        let mut oldest = 0usize;
        for i in 1..MAX_RIPPLES {
            if self.start_times[i] < self.start_times[oldest] {
                oldest = i;
            }
        }
        self.start_times[oldest] = now_sec;
    }

    /// Slot values in shader order. Sentinel slots hold `RIPPLE_SENTINEL`.
    pub fn start_times(&self) -> &[f32; MAX_RIPPLES] {
        &self.start_times
    }

    pub fn active_count(&self) -> usize {
        self.start_times
            .iter()
            .filter(|t| **t > RIPPLE_SENTINEL)
            .count()
    }
}

/// Delay until the next ripple spawn, uniform in [500 ms, 2500 ms).
pub fn spawn_interval<R: Rng>(rng: &mut R) -> Duration {
    Duration::from_secs_f64(rng.gen_range(RIPPLE_MIN_DELAY_SEC..RIPPLE_MAX_DELAY_SEC))
}
