//! Button events reported by the display module
//!
//! The display module debounces its buttons and sends one event per click.

/// Debounced click on one of the front-panel buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// MODE button: cycle Overview → Detail → Graph
    Mode,
    /// NEXT button: select the next probe
    Next,
    /// PREV button: select the previous probe
    Prev,
    /// POWER button: toggle the backlight / rendering
    Power,
}

// Wire format values
const EVENT_MODE: u8 = 0x10;
const EVENT_NEXT: u8 = 0x11;
const EVENT_PREV: u8 = 0x12;
const EVENT_POWER: u8 = 0x13;

impl InputEvent {
    /// Parse an event from its wire format byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            EVENT_MODE => Some(InputEvent::Mode),
            EVENT_NEXT => Some(InputEvent::Next),
            EVENT_PREV => Some(InputEvent::Prev),
            EVENT_POWER => Some(InputEvent::Power),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            InputEvent::Mode => EVENT_MODE,
            InputEvent::Next => EVENT_NEXT,
            InputEvent::Prev => EVENT_PREV,
            InputEvent::Power => EVENT_POWER,
        }
    }

    /// Returns true for the selection buttons
    pub fn is_navigation(&self) -> bool {
        matches!(self, InputEvent::Next | InputEvent::Prev)
    }
}
