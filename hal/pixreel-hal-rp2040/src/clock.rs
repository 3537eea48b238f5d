//! Monotonic clock backed by the embassy time driver

use embassy_time::Instant;
use pixreel_hal::Clock;

/// Milliseconds since boot, from the RP2040 timer peripheral
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
