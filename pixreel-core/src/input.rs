//! Button handling
//!
//! Turns the raw level of a single push button into discrete press events.
//! A press is only reported once the button has been released, classified
//! by how long it was held:
//!
//! ```text
//!   line  ‾‾‾‾\__________________________/‾‾‾‾
//!              |<- debounce ->|          |
//!              ^ press start             ^ release: held = release - start
//! ```
//!
//! If the line is back to idle when the debounce window ends, the press is
//! treated as contact bounce and nothing is reported.
//!
//! Waiting for release blocks the caller for as long as the button is held.
//! The watchdog is fed between release polls so a long hold cannot reset
//! the device.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use pixreel_hal::{Clock, Watchdog};

use crate::config::InputConfig;

/// A completed button press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressEvent {
    /// Released before the long-press threshold
    ShortPress,
    /// Held for at least the long-press threshold
    LongPress,
}

impl PressEvent {
    /// Classify a hold duration against a threshold (inclusive)
    pub fn classify(held_ms: u32, long_press_ms: u32) -> Self {
        if held_ms >= long_press_ms {
            PressEvent::LongPress
        } else {
            PressEvent::ShortPress
        }
    }
}

/// Debouncing button reader
pub struct InputController<B> {
    button: B,
    config: InputConfig,
    /// Hold duration of the last reported press
    last_held_ms: Option<u32>,
}

impl<B: InputPin> InputController<B> {
    /// Create a controller for `button`
    pub fn new(button: B, config: InputConfig) -> Self {
        Self {
            button,
            config,
            last_held_ms: None,
        }
    }

    /// Check if the button is currently pressed
    ///
    /// A pin read error counts as released.
    pub fn is_asserted(&mut self) -> bool {
        let level = if self.config.active_low {
            self.button.is_low()
        } else {
            self.button.is_high()
        };
        level.unwrap_or(false)
    }

    /// Check for a completed press
    ///
    /// Returns immediately with `None` when the button is not pressed.
    /// Otherwise blocks through the debounce window and until release,
    /// feeding `watchdog` every poll interval while held. The hold is
    /// measured from the first detection, so the debounce window counts
    /// toward it.
    pub fn poll<C, D, W>(&mut self, clock: &C, delay: &mut D, watchdog: &mut W) -> Option<PressEvent>
    where
        C: Clock,
        D: DelayNs,
        W: Watchdog,
    {
        if !self.is_asserted() {
            return None;
        }

        let press_start = clock.now_ms();
        delay.delay_ms(self.config.debounce_ms);

        if !self.is_asserted() {
            // Bounce
            return None;
        }

        while self.is_asserted() {
            watchdog.feed();
            delay.delay_ms(self.config.poll_interval_ms);
        }

        let held_ms = clock.elapsed_ms(press_start);
        self.last_held_ms = Some(held_ms);

        Some(PressEvent::classify(held_ms, self.config.long_press_ms))
    }

    /// Hold duration of the most recent reported press
    pub fn last_held_ms(&self) -> Option<u32> {
        self.last_held_ms
    }

    /// Release the button pin
    pub fn into_inner(self) -> B {
        self.button
    }
}
