//! Events that drive the view state machine

use probewatch_protocol::InputEvent;

/// Events that can change the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ViewEvent {
    /// Cycle Overview → Detail → Graph → Overview
    NextMode,
    /// Select the next channel (Detail/Graph only)
    SelectNext,
    /// Select the previous channel (Detail/Graph only)
    SelectPrev,
    /// Turn rendering on or off
    TogglePower,
}

impl ViewEvent {
    /// Check if this event changes the selected channel
    pub fn is_selection_event(&self) -> bool {
        matches!(self, ViewEvent::SelectNext | ViewEvent::SelectPrev)
    }
}

impl From<InputEvent> for ViewEvent {
    fn from(event: InputEvent) -> Self {
        match event {
            InputEvent::Mode => ViewEvent::NextMode,
            InputEvent::Next => ViewEvent::SelectNext,
            InputEvent::Prev => ViewEvent::SelectPrev,
            InputEvent::Power => ViewEvent::TogglePower,
        }
    }
}
