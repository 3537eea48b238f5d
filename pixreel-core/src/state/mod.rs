//! Playback state machine
//!
//! The playback state is an explicit value: every change goes through
//! [`PlaybackState::transition`], which also says whether the stream has to
//! be rewound.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{Action, PlaybackState, Transition};
