//! Configuration loading
//!
//! `player.toml` is compiled into the firmware and was already checked by
//! the build script, so a parse failure here means the two validators
//! disagree. Playback then falls back to the defaults rather than refusing
//! to start.

use defmt::*;
use pixreel_core::config::{parse_config, PlayerConfig};

/// Embedded configuration (compiled into firmware)
/// Edit player.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../player.toml");

/// Parse the embedded configuration, falling back to defaults
pub fn load() -> PlayerConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Config: {} fps, long press {} ms, watchdog {} ms",
                config.playback.frame_rate, config.input.long_press_ms, config.watchdog.timeout_ms
            );
            config
        }
        Err(e) => {
            error!("player.toml rejected: {}; using defaults", e);
            PlayerConfig::default()
        }
    }
}
