//! Frame cadence governor
//!
//! Holds playback to the target frame rate by sleeping only for the part of
//! the frame interval not already spent reading and rendering. Each frame is
//! paced on its own: a slow frame is not made up for by shortening the next.

use embedded_hal::delay::DelayNs;

/// Fixed-interval frame pacer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingGovernor {
    interval_ms: u32,
}

impl TimingGovernor {
    /// Create a governor with an explicit frame interval
    pub const fn new(interval_ms: u32) -> Self {
        Self { interval_ms }
    }

    /// Create a governor for a frame rate (30 fps gives a 33 ms interval)
    pub fn from_frame_rate(frame_rate: u32) -> Self {
        Self::new(1000 / frame_rate.max(1))
    }

    /// Nominal frame interval
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Time left in the frame after `elapsed_ms` of work, never negative
    pub fn residual_ms(&self, elapsed_ms: u32) -> u32 {
        self.interval_ms.saturating_sub(elapsed_ms)
    }

    /// Sleep for the residual time and return how long was slept
    pub fn pace<D: DelayNs>(&self, elapsed_ms: u32, delay: &mut D) -> u32 {
        let residual = self.residual_ms(elapsed_ms);
        if residual > 0 {
            delay.delay_ms(residual);
        }
        residual
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Bench, SimDelay};
    use proptest::prelude::*;

    #[test]
    fn test_interval_from_frame_rate() {
        assert_eq!(TimingGovernor::from_frame_rate(30).interval_ms(), 33);
        assert_eq!(TimingGovernor::from_frame_rate(25).interval_ms(), 40);
        assert_eq!(TimingGovernor::from_frame_rate(1000).interval_ms(), 1);
        // Zero is clamped rather than dividing by zero
        assert_eq!(TimingGovernor::from_frame_rate(0).interval_ms(), 1000);
    }

    #[test]
    fn test_residual() {
        let governor = TimingGovernor::new(33);
        assert_eq!(governor.residual_ms(10), 23);
        assert_eq!(governor.residual_ms(33), 0);
        assert_eq!(governor.residual_ms(40), 0);
    }

    #[test]
    fn test_pace_sleeps_residual_only() {
        let bench = Bench::new();
        let mut delay = SimDelay(&bench);
        let governor = TimingGovernor::new(33);

        assert_eq!(governor.pace(10, &mut delay), 23);
        assert_eq!(bench.sleeps(), [23]);
    }

    #[test]
    fn test_overrun_does_not_sleep() {
        let bench = Bench::new();
        let mut delay = SimDelay(&bench);
        let governor = TimingGovernor::new(33);

        assert_eq!(governor.pace(40, &mut delay), 0);
        assert!(bench.sleeps().is_empty());
    }

    proptest! {
        #[test]
        fn prop_residual_fills_interval(interval in 1u32..1_000, elapsed in 0u32..2_000) {
            let governor = TimingGovernor::new(interval);
            let residual = governor.residual_ms(elapsed);

            prop_assert!(residual <= interval);
            if elapsed <= interval {
                prop_assert_eq!(residual + elapsed, interval);
            } else {
                prop_assert_eq!(residual, 0);
            }
        }
    }
}
