//! Configuration type definitions
//!
//! Every value has a default matching the reference hardware, so a board
//! without a `player.toml` still plays correctly.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Target frame rate (frames per second)
pub const DEFAULT_FRAME_RATE: u32 = 30;

/// Highest accepted frame rate (1 ms per frame)
pub const MAX_FRAME_RATE: u32 = 1000;

/// Button settle window
pub const DEFAULT_DEBOUNCE_MS: u32 = 50;

/// Interval between button reads while waiting for release
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 10;

/// Hold duration at or above which a press is long
pub const DEFAULT_LONG_PRESS_MS: u32 = 2000;

/// Refresh delay while showing the pause or replay icon
pub const DEFAULT_IDLE_REFRESH_MS: u32 = 100;

/// Matrix intensity (0-15)
pub const DEFAULT_BRIGHTNESS: u8 = 2;

/// Highest matrix intensity
pub const MAX_BRIGHTNESS: u8 = 15;

/// Watchdog timeout
pub const DEFAULT_WATCHDOG_TIMEOUT_MS: u32 = 2000;

/// Longest timeout the RP2040 watchdog can count
pub const MAX_WATCHDOG_TIMEOUT_MS: u32 = 8300;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Frame rate is zero or above [`MAX_FRAME_RATE`]
    FrameRate,
    /// Brightness above [`MAX_BRIGHTNESS`]
    Brightness,
    /// Long-press threshold not above the debounce window
    LongPressThreshold,
    /// Release poll interval is zero
    PollInterval,
    /// Watchdog timeout is zero, too long for the hardware, or would
    /// expire during a normal loop iteration
    WatchdogTimeout,
}

/// Frame pacing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlaybackConfig {
    /// Target frames per second
    pub frame_rate: u32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            frame_rate: DEFAULT_FRAME_RATE,
        }
    }
}

impl PlaybackConfig {
    /// Nominal frame interval (30 fps gives 33 ms)
    pub fn frame_interval_ms(&self) -> u32 {
        1000 / self.frame_rate.max(1)
    }
}

/// Button handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InputConfig {
    /// Button pulls the line low when pressed (pull-up wiring)
    pub active_low: bool,
    /// Settle window before trusting a press
    pub debounce_ms: u32,
    /// Read interval while waiting for release
    pub poll_interval_ms: u32,
    /// Long-press threshold (inclusive)
    pub long_press_ms: u32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            active_low: true,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            long_press_ms: DEFAULT_LONG_PRESS_MS,
        }
    }
}

/// Matrix output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Intensity (0-15)
    pub brightness: u8,
    /// Delay between icon refreshes while paused or finished
    pub idle_refresh_ms: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            brightness: DEFAULT_BRIGHTNESS,
            idle_refresh_ms: DEFAULT_IDLE_REFRESH_MS,
        }
    }
}

/// Hardware watchdog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WatchdogConfig {
    /// Reset the device if not fed within this window
    pub timeout_ms: u32,
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WATCHDOG_TIMEOUT_MS,
        }
    }
}

/// Complete player configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlayerConfig {
    pub playback: PlaybackConfig,
    pub input: InputConfig,
    pub display: DisplayConfig,
    pub watchdog: WatchdogConfig,
}

impl PlayerConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Check value ranges and cross-field constraints
    ///
    /// The watchdog window must outlast the longest run of sleeps with no
    /// feed between them. A bounce sleeps the debounce window and then the
    /// idle refresh. A release sleeps one last poll and then the idle
    /// refresh or the frame interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.playback.frame_rate == 0 || self.playback.frame_rate > MAX_FRAME_RATE {
            return Err(ConfigError::FrameRate);
        }
        if self.display.brightness > MAX_BRIGHTNESS {
            return Err(ConfigError::Brightness);
        }
        if self.input.poll_interval_ms == 0 {
            return Err(ConfigError::PollInterval);
        }
        if self.input.long_press_ms <= self.input.debounce_ms {
            return Err(ConfigError::LongPressThreshold);
        }

        let timeout = self.watchdog.timeout_ms;
        if timeout == 0 || timeout > MAX_WATCHDOG_TIMEOUT_MS || timeout <= self.longest_unfed_ms() {
            return Err(ConfigError::WatchdogTimeout);
        }

        Ok(())
    }

    /// Longest stretch a loop iteration can sleep without feeding the watchdog
    pub fn longest_unfed_ms(&self) -> u32 {
        let input = self.input.debounce_ms.max(self.input.poll_interval_ms);
        let render = self
            .playback
            .frame_interval_ms()
            .max(self.display.idle_refresh_ms);
        input.saturating_add(render)
    }
}
