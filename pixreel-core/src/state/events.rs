//! Events that trigger state transitions

use crate::input::PressEvent;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// The button was pressed and released
    Press(PressEvent),
    /// The frame stream has no more frames
    StreamExhausted,
}

impl Event {
    /// Check if this event is user-initiated
    pub fn is_user_event(&self) -> bool {
        matches!(self, Event::Press(_))
    }

    /// Check if this is a long press
    pub fn is_long_press(&self) -> bool {
        matches!(self, Event::Press(PressEvent::LongPress))
    }
}

impl From<PressEvent> for Event {
    fn from(press: PressEvent) -> Self {
        Event::Press(press)
    }
}
