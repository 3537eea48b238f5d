//! Animation playback
//!
//! Opens the frame stream linked into flash, arms the watchdog and hands
//! the board to the player. Everything the player does is logged from the
//! per-tick reports.

use core::ops::ControlFlow;

use defmt::*;
use embassy_time::Delay;
use embedded_hal::digital::OutputPin;
use pixreel_core::config::PlayerConfig;
use pixreel_core::player::{Player, Rendered, TickReport};
use pixreel_core::state::{Action, PlaybackState};
use pixreel_core::stream::{FrameStream, SliceSource};
use pixreel_core::PressEvent;
use pixreel_hal::DisplaySink;
use pixreel_hal_rp2040::EmbassyClock;

use crate::board::Board;

/// Pre-rendered animation, 8 bytes per frame
static FRAMES: &[u8] = include_bytes!("../frames.bin");

/// Play until the stream or the display fails
///
/// Returns with the display blanked, the busy LED off and the watchdog
/// stopped.
pub fn play(board: Board, config: &PlayerConfig) {
    let Board {
        mut display,
        button,
        mut busy_led,
        mut watchdog,
    } = board;

    let stream = match FrameStream::open(SliceSource::new(FRAMES)) {
        Ok(stream) => stream,
        Err(e) => {
            error!("Error: Could not open frames.bin: {}", e);
            let _ = display.blank();
            let _ = busy_led.set_low();
            return;
        }
    };

    info!(
        "Loaded {} frames at {} fps",
        stream.frame_count(),
        config.playback.frame_rate
    );

    watchdog.start(config.watchdog.timeout_ms);
    info!("Starting animation. Press to play/pause. Long press (2s) to restart.");

    let mut player = Player::new(stream, button, display, &mut watchdog, busy_led, config);
    let result = player.run(&EmbassyClock, &mut Delay, |report| {
        log_tick(report);
        ControlFlow::Continue(())
    });

    if let Err(e) = result {
        error!("Playback stopped: {}", e);
    }

    watchdog.stop();
    info!("Animation finished.");
}

fn log_tick(report: &TickReport) {
    if let (Some(press), Some(transition)) = (report.press, report.input_transition) {
        debug!("{} after {} ms", press, report.held_ms);

        if transition.from == PlaybackState::Finished {
            info!("Button pressed. Replaying video.");
        } else if press == PressEvent::LongPress && transition.action == Action::Rewind {
            info!("Long press detected. Restarting animation.");
        } else if transition.from != transition.to {
            info!(
                "State changed: Paused = {}",
                transition.to == PlaybackState::Paused
            );
        } else {
            debug!("{} ignored while {}", press, transition.from);
        }
    }

    if report.finished {
        info!("End of video. Press button to replay.");
    }

    if let Rendered::Frame { index } = report.rendered {
        if report.slept_ms == 0 {
            warn!("Frame {} overran its interval", index);
        } else {
            trace!("Frame {} (slept {} ms)", index, report.slept_ms);
        }
    }
}
