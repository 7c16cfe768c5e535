//! Minimal-redraw rendering
//!
//! Each frame is captured as a [`Snapshot`], diffed against the last
//! committed one, and only the changed regions are painted. Only the
//! painted regions are folded into the previous snapshot, and only after
//! every drawing call succeeded; a failed draw invalidates it so the next
//! frame is redrawn in full.

pub mod diff;
pub mod layout;
pub mod painter;
pub mod snapshot;

pub use diff::{value_changed, PreviousSnapshot, RedrawPlan, Region, RenderDiff, MAX_REGIONS};
pub use layout::Layout;
pub use snapshot::{ChannelView, GraphView, Snapshot};

use probewatch_display::{DisplayBackend, DisplayError};

use crate::alarm::AlarmBank;
use crate::history::SampleStore;
use crate::view::ViewState;

/// Result of one render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderOutcome {
    /// Display is off; nothing was attempted
    Suspended,
    /// Frame matches the committed snapshot
    Unchanged,
    /// Regions were repainted and committed
    Drawn { full: bool, regions: u8 },
    /// A drawing call failed; next frame will be a full redraw
    Failed(DisplayError),
}

/// Diff engine plus layout for one display
#[derive(Debug, Clone)]
pub struct Renderer {
    diff: RenderDiff,
    layout: Layout,
}

impl Renderer {
    pub fn new(tolerance: f32, layout: Layout) -> Self {
        Self {
            diff: RenderDiff::new(tolerance),
            layout,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn diff(&self) -> &RenderDiff {
        &self.diff
    }

    /// Force a full redraw on the next render (e.g. after power-on)
    pub fn invalidate(&mut self) {
        self.diff.invalidate();
    }

    /// Draw whatever changed since the last committed frame
    pub fn render<D: DisplayBackend, const C: usize, const N: usize>(
        &mut self,
        display: &mut D,
        view: &ViewState,
        store: &SampleStore<C, N>,
        alarms: &AlarmBank<C>,
    ) -> RenderOutcome {
        let key = view.frame_key();
        let snapshot = Snapshot::capture(view, store, alarms);
        let plan = self.diff.plan(key, &snapshot);
        if plan.is_empty() {
            return RenderOutcome::Unchanged;
        }

        match painter::paint(display, &self.layout, &plan, &snapshot, store) {
            Ok(()) => {
                self.diff.commit_plan(key, &plan, &snapshot);
                RenderOutcome::Drawn {
                    full: plan.full,
                    regions: plan.regions.len() as u8,
                }
            }
            Err(e) => {
                self.diff.invalidate();
                RenderOutcome::Failed(e)
            }
        }
    }
}
