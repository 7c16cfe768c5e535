//! View state machine definition

use super::events::ViewEvent;

/// Screen modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// All channels, one row each
    #[default]
    Overview,
    /// One channel, large value and alarm status
    Detail,
    /// One channel, history curve and statistics
    Graph,
}

impl Mode {
    /// Next mode in the cycle
    pub fn next(self) -> Self {
        match self {
            Mode::Overview => Mode::Detail,
            Mode::Detail => Mode::Graph,
            Mode::Graph => Mode::Overview,
        }
    }

    /// Check if this mode shows a single selected channel
    pub fn is_single_channel(&self) -> bool {
        matches!(self, Mode::Detail | Mode::Graph)
    }
}

/// Identity of a rendered frame; any change forces a full redraw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameKey {
    pub mode: Mode,
    pub selection: Option<usize>,
}

/// Effect of an event on the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ViewChange {
    /// Nothing changed
    None,
    /// Mode or selection changed
    Frame,
    /// Display power toggled to the given state
    Power(bool),
}

/// Mode, selection and display power
///
/// Selection is always `None` or a valid channel index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ViewState {
    mode: Mode,
    selection: Option<usize>,
    display_on: bool,
    channel_count: usize,
}

impl ViewState {
    /// Start in Overview with the display on
    pub fn new(channel_count: usize) -> Self {
        Self {
            mode: Mode::Overview,
            selection: None,
            display_on: true,
            channel_count,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn display_on(&self) -> bool {
        self.display_on
    }

    pub fn channel_count(&self) -> usize {
        self.channel_count
    }

    pub fn frame_key(&self) -> FrameKey {
        FrameKey {
            mode: self.mode,
            selection: self.selection,
        }
    }

    /// Process an event
    ///
    /// Input is handled while the display is off; only rendering stops.
    pub fn handle(&mut self, event: ViewEvent) -> ViewChange {
        use ViewEvent::*;

        let before = self.frame_key();
        match (self.mode, event) {
            (_, TogglePower) => {
                self.display_on = !self.display_on;
                return ViewChange::Power(self.display_on);
            }

            (Mode::Overview, NextMode) => {
                self.mode = Mode::Detail;
                if self.selection.is_none() && self.channel_count > 0 {
                    self.selection = Some(0);
                }
            }
            (Mode::Detail, NextMode) => self.mode = Mode::Graph,
            (Mode::Graph, NextMode) => {
                self.mode = Mode::Overview;
                self.selection = None;
            }

            (Mode::Detail | Mode::Graph, SelectNext) => {
                self.selection = step_selection(self.selection, self.channel_count, true);
            }
            (Mode::Detail | Mode::Graph, SelectPrev) => {
                self.selection = step_selection(self.selection, self.channel_count, false);
            }

            // Selection buttons do nothing in Overview
            (Mode::Overview, SelectNext | SelectPrev) => {}
        }

        if self.frame_key() == before {
            ViewChange::None
        } else {
            ViewChange::Frame
        }
    }
}

/// Move the selection one step, wrapping over `count` channels
fn step_selection(current: Option<usize>, count: usize, forward: bool) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let next = match (current, forward) {
        (None, true) => 0,
        (None, false) => count - 1,
        (Some(i), true) => (i + 1) % count,
        (Some(i), false) => (i % count + count - 1) % count,
    };
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_mode(mode: Mode, channels: usize) -> ViewState {
        let mut view = ViewState::new(channels);
        while view.mode() != mode {
            view.handle(ViewEvent::NextMode);
        }
        view
    }

    #[test]
    fn test_mode_cycle() {
        let mut view = ViewState::new(2);
        assert_eq!(view.handle(ViewEvent::NextMode), ViewChange::Frame);
        assert_eq!(view.mode(), Mode::Detail);
        assert_eq!(view.selection(), Some(0));

        view.handle(ViewEvent::NextMode);
        assert_eq!(view.mode(), Mode::Graph);
        assert_eq!(view.selection(), Some(0));

        view.handle(ViewEvent::NextMode);
        assert_eq!(view.mode(), Mode::Overview);
        assert_eq!(view.selection(), None);
    }

    #[test]
    fn test_three_mode_presses_return_to_start() {
        for start in [Mode::Overview, Mode::Detail, Mode::Graph] {
            let mut view = in_mode(start, 3);
            for _ in 0..3 {
                view.handle(ViewEvent::NextMode);
            }
            assert_eq!(view.mode(), start);
        }
    }

    #[test]
    fn test_selection_wraps() {
        let mut view = in_mode(Mode::Detail, 4);
        view.selection = Some(3);
        view.handle(ViewEvent::SelectNext);
        assert_eq!(view.selection(), Some(0));

        view.handle(ViewEvent::SelectPrev);
        assert_eq!(view.selection(), Some(3));
    }

    #[test]
    fn test_select_from_nothing() {
        let mut view = in_mode(Mode::Graph, 4);
        view.selection = None;
        view.handle(ViewEvent::SelectPrev);
        assert_eq!(view.selection(), Some(3));

        view.selection = None;
        view.handle(ViewEvent::SelectNext);
        assert_eq!(view.selection(), Some(0));
    }

    #[test]
    fn test_selection_ignored_in_overview() {
        let mut view = ViewState::new(4);
        assert_eq!(view.handle(ViewEvent::SelectNext), ViewChange::None);
        assert_eq!(view.handle(ViewEvent::SelectPrev), ViewChange::None);
        assert_eq!(view.selection(), None);
    }

    #[test]
    fn test_single_channel_selection_is_unchanged() {
        let mut view = in_mode(Mode::Detail, 1);
        assert_eq!(view.handle(ViewEvent::SelectNext), ViewChange::None);
        assert_eq!(view.selection(), Some(0));
    }

    #[test]
    fn test_no_channels_keeps_selection_null() {
        let mut view = ViewState::new(0);
        view.handle(ViewEvent::NextMode);
        assert_eq!(view.mode(), Mode::Detail);
        assert_eq!(view.selection(), None);

        view.handle(ViewEvent::SelectNext);
        view.handle(ViewEvent::SelectPrev);
        assert_eq!(view.selection(), None);
    }

    #[test]
    fn test_power_toggle_is_orthogonal() {
        let mut view = in_mode(Mode::Detail, 2);
        assert_eq!(view.handle(ViewEvent::TogglePower), ViewChange::Power(false));
        assert!(!view.display_on());
        assert_eq!(view.mode(), Mode::Detail);

        // Navigation still works while dark
        view.handle(ViewEvent::SelectNext);
        assert_eq!(view.selection(), Some(1));

        assert_eq!(view.handle(ViewEvent::TogglePower), ViewChange::Power(true));
    }
}
