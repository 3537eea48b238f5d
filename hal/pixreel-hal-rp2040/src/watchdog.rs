//! Hardware watchdog for RP2040
//!
//! Wraps the embassy-rp watchdog so the playback engine can feed it through
//! the shared `pixreel_hal::Watchdog` trait. The watchdog is paused while a
//! debugger halts the core, otherwise stepping through code would reset the
//! board.

use embassy_rp::peripherals::WATCHDOG;
use embassy_rp::watchdog::{ResetReason, Watchdog};
use embassy_rp::Peri;
use embassy_time::Duration;

/// Why the chip came out of its last reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetCause {
    /// Power-on or reset pin
    PowerOn,
    /// The watchdog expired
    WatchdogTimeout,
    /// Reset forced by software through the watchdog
    Forced,
}

/// RP2040 hardware watchdog
pub struct Rp2040Watchdog {
    inner: Watchdog,
    running: bool,
}

impl Rp2040Watchdog {
    /// Take the watchdog peripheral. The watchdog is not started yet.
    pub fn new(watchdog: Peri<'static, WATCHDOG>) -> Self {
        let mut inner = Watchdog::new(watchdog);
        inner.pause_on_debug(true);
        Self {
            inner,
            running: false,
        }
    }

    /// Cause of the last reset
    pub fn reset_cause(&self) -> ResetCause {
        match self.inner.reset_reason() {
            Some(ResetReason::TimedOut) => ResetCause::WatchdogTimeout,
            Some(ResetReason::Forced) => ResetCause::Forced,
            None => ResetCause::PowerOn,
        }
    }

    /// Arm the watchdog with `timeout_ms`
    ///
    /// From here on the board resets unless fed at least once per window.
    pub fn start(&mut self, timeout_ms: u32) {
        self.inner.start(Duration::from_millis(u64::from(timeout_ms)));
        self.running = true;
    }

    /// Disarm the watchdog
    pub fn stop(&mut self) {
        self.inner.stop();
        self.running = false;
    }

    /// Check if the watchdog is armed
    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl pixreel_hal::Watchdog for Rp2040Watchdog {
    fn feed(&mut self) {
        if self.running {
            self.inner.feed();
        }
    }
}
