//! pixreel - LED Matrix Animation Player Firmware
//!
//! Main firmware binary for an RP2040 driving an 8x8 MAX7219 matrix.
//! Plays a pre-rendered animation linked into flash, with a single button
//! for play/pause (short press) and restart (long press), under a hardware
//! watchdog for unattended operation.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::Timer;
use pixreel_hal_rp2040::ResetCause;
use {defmt_rtt as _, panic_probe as _};

mod board;
mod config;
mod playback;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("pixreel firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();
    let board = board::Board::new(p, &config);

    match board.watchdog.reset_cause() {
        ResetCause::WatchdogTimeout => warn!("Recovered from a watchdog reset"),
        cause => debug!("Reset cause: {}", cause),
    }

    // Runs on this task until playback ends; there is nothing to spawn
    playback::play(board, &config);

    // Park. The watchdog is stopped so this never resets the board.
    loop {
        Timer::after_secs(60).await;
        trace!("idle");
    }
}
