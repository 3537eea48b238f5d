//! Board-agnostic playback engine for the 8x8 LED matrix player
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Frame record layout and the built-in icons
//! - Frame stream reader over any `embedded-io` source
//! - Button debounce and short/long press classification
//! - Frame cadence governor
//! - Playback state machine
//! - The per-iteration playback loop tying them together
//! - Configuration types and the `player.toml` parser

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod frame;
pub mod input;
pub mod player;
pub mod state;
pub mod stream;
pub mod timing;

#[cfg(test)]
mod testing;

pub use frame::{Frame, FRAME_SIZE};
pub use input::{InputController, PressEvent};
pub use player::{Player, PlayerError, Rendered, TickReport};
pub use state::{Action, Event, PlaybackState, Transition};
pub use stream::{FrameStream, SliceSource, StreamError};
pub use timing::TimingGovernor;
