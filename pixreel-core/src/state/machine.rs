//! State machine definition
//!
//! What the player shows on each loop iteration is a function of the
//! current state alone. Transitions are driven by button presses and by the
//! stream running out of frames.

use super::events::Event;
use crate::frame::Frame;
use crate::input::PressEvent;

/// Playback states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlaybackState {
    /// Frames are read and shown at the target rate
    Playing,
    /// Pause icon shown, stream cursor held where it was
    #[default]
    Paused,
    /// Stream exhausted, replay icon shown
    Finished,
}

/// Side effect a transition asks the player to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Nothing beyond the state change
    None,
    /// Move the stream back to its first frame
    Rewind,
}

/// Result of applying an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub from: PlaybackState,
    pub to: PlaybackState,
    pub action: Action,
}

impl Transition {
    /// Check if the event did anything at all
    pub fn is_change(&self) -> bool {
        self.from != self.to || self.action != Action::None
    }
}

impl PlaybackState {
    /// Check if this state reads frames from the stream
    pub fn renders_frames(&self) -> bool {
        matches!(self, PlaybackState::Playing)
    }

    /// Icon shown while idle in this state
    pub fn idle_icon(&self) -> Option<Frame> {
        match self {
            PlaybackState::Playing => None,
            PlaybackState::Paused => Some(Frame::PAUSE_ICON),
            PlaybackState::Finished => Some(Frame::REPLAY_ICON),
        }
    }

    /// Process an event and return the resulting transition
    pub fn transition(self, event: Event) -> Transition {
        use PlaybackState::*;
        use PressEvent::*;

        let (to, action) = match (self, event) {
            // Any press after the end replays from the start
            (Finished, Event::Press(_)) => (Playing, Action::Rewind),

            // Long press restarts without pausing
            (Playing, Event::Press(LongPress)) => (Playing, Action::Rewind),
            (Playing, Event::Press(ShortPress)) => (Paused, Action::None),
            (Playing, Event::StreamExhausted) => (Finished, Action::None),

            (Paused, Event::Press(ShortPress)) => (Playing, Action::None),

            // Default: stay in current state
            _ => (self, Action::None),
        };

        Transition {
            from: self,
            to,
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHORT: Event = Event::Press(PressEvent::ShortPress);
    const LONG: Event = Event::Press(PressEvent::LongPress);

    #[test]
    fn test_boots_paused() {
        assert_eq!(PlaybackState::default(), PlaybackState::Paused);
    }

    #[test]
    fn test_short_press_toggles_pause() {
        let t = PlaybackState::Playing.transition(SHORT);
        assert_eq!(t.to, PlaybackState::Paused);
        assert_eq!(t.action, Action::None);

        let t = PlaybackState::Paused.transition(SHORT);
        assert_eq!(t.to, PlaybackState::Playing);
        assert_eq!(t.action, Action::None);
    }

    #[test]
    fn test_long_press_while_playing_restarts() {
        let t = PlaybackState::Playing.transition(LONG);
        assert_eq!(t.to, PlaybackState::Playing);
        assert_eq!(t.action, Action::Rewind);
        assert!(t.is_change());
    }

    #[test]
    fn test_long_press_while_paused_is_ignored() {
        let t = PlaybackState::Paused.transition(LONG);
        assert_eq!(t.to, PlaybackState::Paused);
        assert!(!t.is_change());
    }

    #[test]
    fn test_any_press_replays_when_finished() {
        for event in [SHORT, LONG] {
            let t = PlaybackState::Finished.transition(event);
            assert_eq!(t.to, PlaybackState::Playing);
            assert_eq!(t.action, Action::Rewind);
        }
    }

    #[test]
    fn test_exhaustion_only_matters_while_playing() {
        let t = PlaybackState::Playing.transition(Event::StreamExhausted);
        assert_eq!(t.to, PlaybackState::Finished);

        for state in [PlaybackState::Paused, PlaybackState::Finished] {
            let t = state.transition(Event::StreamExhausted);
            assert_eq!(t.to, state);
            assert!(!t.is_change());
        }
    }

    #[test]
    fn test_idle_icons() {
        assert_eq!(PlaybackState::Playing.idle_icon(), None);
        assert_eq!(PlaybackState::Paused.idle_icon(), Some(Frame::PAUSE_ICON));
        assert_eq!(PlaybackState::Finished.idle_icon(), Some(Frame::REPLAY_ICON));
        assert!(PlaybackState::Playing.renders_frames());
        assert!(!PlaybackState::Finished.renders_frames());
    }

    #[test]
    fn test_transition_records_origin() {
        for state in [
            PlaybackState::Playing,
            PlaybackState::Paused,
            PlaybackState::Finished,
        ] {
            for event in [SHORT, LONG, Event::StreamExhausted] {
                assert_eq!(state.transition(event).from, state);
            }
        }
    }
}
