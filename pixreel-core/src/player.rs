//! Playback loop
//!
//! [`Player`] owns every resource playback touches and runs one loop
//! iteration per [`Player::tick`]:
//!
//! ```text
//!   feed watchdog -> poll button -> apply press -> toggle busy LED -> render
//!                                                                       |
//!        Playing:  read frame, show, sleep the governor's residual <----+
//!        Paused:   show pause icon, sleep the idle refresh        <-----+
//!        Finished: show replay icon, sleep the idle refresh       <-----+
//! ```
//!
//! The player never logs. Each tick returns a [`TickReport`] describing
//! what happened so the caller can.

use core::ops::ControlFlow;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, StatefulOutputPin};
use embedded_io::{Read, Seek};
use pixreel_hal::{Clock, DisplaySink, Watchdog};

use crate::config::PlayerConfig;
use crate::frame::Frame;
use crate::input::{InputController, PressEvent};
use crate::state::{Action, Event, PlaybackState, Transition};
use crate::stream::{FrameStream, StreamError};
use crate::timing::TimingGovernor;

/// Fatal playback errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayerError {
    /// Frame source failed while reading or rewinding
    Stream(StreamError),
    /// Display rejected a frame
    Display,
}

impl From<StreamError> for PlayerError {
    fn from(e: StreamError) -> Self {
        PlayerError::Stream(e)
    }
}

/// What a tick put on the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rendered {
    /// Stream frame at this index (0-based)
    Frame { index: u32 },
    PauseIcon,
    ReplayIcon,
    /// The stream ran out this tick
    Nothing,
}

/// Summary of one loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Press reported by the button, if any
    pub press: Option<PressEvent>,
    /// How long that press was held
    pub held_ms: Option<u32>,
    /// Transition caused by the press
    pub input_transition: Option<Transition>,
    /// The stream ran out and playback moved to Finished
    pub finished: bool,
    pub rendered: Rendered,
    /// Time spent in the pacing or idle sleep
    pub slept_ms: u32,
    /// State at the end of the tick
    pub state: PlaybackState,
}

impl TickReport {
    /// Check if a press changed the state or restarted the stream
    pub fn press_changed_playback(&self) -> bool {
        self.input_transition.is_some_and(|t| t.is_change())
    }
}

/// The animation player
pub struct Player<S, B, D, W, L> {
    stream: FrameStream<S>,
    input: InputController<B>,
    governor: TimingGovernor,
    state: PlaybackState,
    display: D,
    watchdog: W,
    busy_led: L,
    idle_refresh_ms: u32,
}

impl<S, B, D, W, L> Player<S, B, D, W, L>
where
    S: Read + Seek,
    B: InputPin,
    D: DisplaySink,
    W: Watchdog,
    L: StatefulOutputPin,
{
    /// Create a player in the boot state (Paused)
    pub fn new(
        stream: FrameStream<S>,
        button: B,
        display: D,
        watchdog: W,
        busy_led: L,
        config: &PlayerConfig,
    ) -> Self {
        Self {
            stream,
            input: InputController::new(button, config.input),
            governor: TimingGovernor::from_frame_rate(config.playback.frame_rate),
            state: PlaybackState::default(),
            display,
            watchdog,
            busy_led,
            idle_refresh_ms: config.display.idle_refresh_ms,
        }
    }

    /// Current playback state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// The frame stream being played
    pub fn stream(&self) -> &FrameStream<S> {
        &self.stream
    }

    /// Run one loop iteration
    pub fn tick<C, Dl>(&mut self, clock: &C, delay: &mut Dl) -> Result<TickReport, PlayerError>
    where
        C: Clock,
        Dl: DelayNs,
    {
        // Must come before the poll, which may block for a whole hold
        self.watchdog.feed();

        let press = self.input.poll(clock, delay, &mut self.watchdog);
        let input_transition = match press {
            Some(press) => Some(self.apply(Event::Press(press))?),
            None => None,
        };

        let _ = self.busy_led.toggle();

        let mut report = TickReport {
            press,
            held_ms: press.and(self.input.last_held_ms()),
            input_transition,
            finished: false,
            rendered: Rendered::Nothing,
            slept_ms: 0,
            state: self.state,
        };

        if self.state.renders_frames() {
            let started = clock.now_ms();
            match self.stream.next_frame()? {
                Some(frame) => {
                    self.show(&frame)?;
                    report.rendered = Rendered::Frame {
                        index: self.stream.position().saturating_sub(1),
                    };
                    report.slept_ms = self.governor.pace(clock.elapsed_ms(started), delay);
                }
                None => {
                    self.apply(Event::StreamExhausted)?;
                    report.finished = true;
                }
            }
        } else if let Some(icon) = self.state.idle_icon() {
            self.show(&icon)?;
            report.rendered = if self.state == PlaybackState::Finished {
                Rendered::ReplayIcon
            } else {
                Rendered::PauseIcon
            };
            report.slept_ms = self.idle(delay);
        }

        report.state = self.state;
        Ok(report)
    }

    /// Tick until `on_tick` breaks or an error occurs
    ///
    /// The display is blanked and the busy LED turned off on every exit
    /// path.
    pub fn run<C, Dl, F>(&mut self, clock: &C, delay: &mut Dl, mut on_tick: F) -> Result<(), PlayerError>
    where
        C: Clock,
        Dl: DelayNs,
        F: FnMut(&TickReport) -> ControlFlow<()>,
    {
        let result = loop {
            match self.tick(clock, delay) {
                Ok(report) => {
                    if on_tick(&report).is_break() {
                        break Ok(());
                    }
                }
                Err(e) => break Err(e),
            }
        };

        self.shutdown();
        result
    }

    /// Blank the display and turn the busy LED off
    ///
    /// Best effort: failures are ignored since there is nothing left to
    /// report them to.
    pub fn shutdown(&mut self) {
        let _ = self.display.blank();
        let _ = self.busy_led.set_low();
    }

    /// Release the hardware
    pub fn into_parts(self) -> (FrameStream<S>, B, D, W, L) {
        (
            self.stream,
            self.input.into_inner(),
            self.display,
            self.watchdog,
            self.busy_led,
        )
    }

    fn apply(&mut self, event: Event) -> Result<Transition, PlayerError> {
        let transition = self.state.transition(event);
        if transition.action == Action::Rewind {
            self.stream.rewind()?;
        }
        self.state = transition.to;
        Ok(transition)
    }

    fn show(&mut self, frame: &Frame) -> Result<(), PlayerError> {
        self.display
            .show(frame.rows())
            .map_err(|_| PlayerError::Display)
    }

    fn idle<Dl: DelayNs>(&self, delay: &mut Dl) -> u32 {
        delay.delay_ms(self.idle_refresh_ms);
        self.idle_refresh_ms
    }
}
