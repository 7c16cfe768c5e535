//! Minimal-redraw planning
//!
//! Compares the snapshot about to be drawn against the last committed one
//! and lists the regions that changed. A changed frame key (mode or
//! selection), a first render, or an invalidated previous snapshot means
//! a full redraw.

use heapless::Vec;

use super::snapshot::{ChannelView, GraphView, Snapshot};
use crate::config::MAX_CHANNELS;
use crate::history::Stats;
use crate::view::FrameKey;

/// Most regions a single plan can hold (title plus every overview row)
pub const MAX_REGIONS: usize = MAX_CHANNELS + 2;

/// Independently repaintable screen regions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Region {
    /// Title bar; only part of full redraws
    Title,
    /// One row of the overview list
    OverviewRow(usize),
    /// Large value and alarm block of the detail page
    DetailValue,
    /// Statistics labels of the graph page
    GraphInfo,
    /// History curve of the graph page
    GraphCurve,
    /// Placeholder shown when there are no probes
    NoProbes,
}

/// Regions to repaint for one frame
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RedrawPlan {
    /// Clear the whole screen first
    pub full: bool,
    pub regions: Vec<Region, MAX_REGIONS>,
}

impl RedrawPlan {
    /// Nothing to draw
    pub fn is_empty(&self) -> bool {
        !self.full && self.regions.is_empty()
    }

    fn push(&mut self, region: Region) {
        // Every snapshot yields at most MAX_REGIONS regions
        let _ = self.regions.push(region);
    }

    /// Plan that repaints everything `snapshot` shows
    pub fn full(snapshot: &Snapshot) -> Self {
        let mut plan = RedrawPlan {
            full: true,
            regions: Vec::new(),
        };
        plan.push(Region::Title);
        if snapshot.is_empty() {
            plan.push(Region::NoProbes);
            return plan;
        }
        match snapshot {
            Snapshot::Overview { rows } => {
                for row in rows.iter() {
                    plan.push(Region::OverviewRow(row.index));
                }
            }
            Snapshot::Detail { .. } => plan.push(Region::DetailValue),
            Snapshot::Graph { .. } => {
                plan.push(Region::GraphInfo);
                plan.push(Region::GraphCurve);
            }
        }
        plan
    }
}

fn magnitude(x: f32) -> f32 {
    if x < 0.0 {
        -x
    } else {
        x
    }
}

/// Compare two optional values against a tolerance
///
/// Both present: changed when `|Δ| >= tolerance`, allowing for the
/// rounding error of the subtraction so that a step of exactly one
/// tolerance (e.g. 21.2 to 21.3 at 0.1) counts as a change. Present vs
/// absent: changed. Both absent: unchanged.
pub fn value_changed(previous: Option<f32>, current: Option<f32>, tolerance: f32) -> bool {
    match (previous, current) {
        (Some(a), Some(b)) => {
            let delta = magnitude(b - a);
            let slack = f32::EPSILON * magnitude(a).max(magnitude(b));
            delta + slack >= tolerance
        }
        (None, None) => false,
        _ => true,
    }
}

fn row_changed(previous: &ChannelView, current: &ChannelView, tolerance: f32) -> bool {
    previous.id != current.id
        || previous.alarm != current.alarm
        || value_changed(previous.value, current.value, tolerance)
}

fn stats_changed(previous: Option<Stats>, current: Option<Stats>, tolerance: f32) -> bool {
    match (previous, current) {
        (Some(a), Some(b)) => {
            value_changed(Some(a.min), Some(b.min), tolerance)
                || value_changed(Some(a.max), Some(b.max), tolerance)
                || value_changed(Some(a.avg), Some(b.avg), tolerance)
        }
        (None, None) => false,
        _ => true,
    }
}

fn graph_info_changed(previous: &GraphView, current: &GraphView, tolerance: f32) -> bool {
    row_changed(&previous.channel, &current.channel, tolerance)
        || stats_changed(previous.stats, current.stats, tolerance)
}

/// Copy the planned regions of `current` into `previous`
///
/// Returns false when the snapshots are of different shapes.
fn merge_regions(previous: &mut Snapshot, plan: &RedrawPlan, current: &Snapshot) -> bool {
    match (previous, current) {
        (Snapshot::Overview { rows: prev }, Snapshot::Overview { rows: cur }) => {
            for region in plan.regions.iter() {
                let Region::OverviewRow(index) = *region else {
                    continue;
                };
                let Some(row) = cur.iter().find(|r| r.index == index) else {
                    continue;
                };
                match prev.iter_mut().find(|r| r.index == index) {
                    Some(slot) => *slot = *row,
                    // Both bounded by MAX_CHANNELS
                    None => {
                        let _ = prev.push(*row);
                    }
                }
            }
            true
        }
        (Snapshot::Detail { channel: prev }, Snapshot::Detail { channel: cur }) => {
            if plan.regions.contains(&Region::DetailValue) {
                *prev = *cur;
            }
            true
        }
        (Snapshot::Graph { graph: Some(prev) }, Snapshot::Graph { graph: Some(cur) }) => {
            if plan.regions.contains(&Region::GraphInfo) {
                prev.channel = cur.channel;
                prev.stats = cur.stats;
            }
            if plan.regions.contains(&Region::GraphCurve) {
                prev.stored_total = cur.stored_total;
            }
            true
        }
        _ => false,
    }
}

/// The last successfully drawn frame
#[derive(Debug, Clone, Default)]
pub struct PreviousSnapshot {
    committed: Option<(FrameKey, Snapshot)>,
}

impl PreviousSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// True on first render, after invalidation, or when the frame changed
    pub fn should_full_redraw(&self, key: FrameKey) -> bool {
        self.committed.as_ref().map_or(true, |(k, _)| *k != key)
    }

    /// Record a frame that was drawn completely
    pub fn commit(&mut self, key: FrameKey, snapshot: Snapshot) {
        self.committed = Some((key, snapshot));
    }

    /// Record the regions of `plan` as drawn from `current`
    ///
    /// Regions outside the plan keep their committed values, so changes
    /// below tolerance accumulate until they are large enough to paint.
    pub fn merge(&mut self, key: FrameKey, plan: &RedrawPlan, current: &Snapshot) {
        let merged = match self.committed.as_mut() {
            Some((k, previous)) if !plan.full && *k == key => {
                merge_regions(previous, plan, current)
            }
            _ => false,
        };
        if !merged {
            self.commit(key, current.clone());
        }
    }

    /// Forget the last frame so the next render is a full redraw
    pub fn invalidate(&mut self) {
        self.committed = None;
    }

    pub fn get(&self) -> Option<&Snapshot> {
        self.committed.as_ref().map(|(_, s)| s)
    }

    pub fn is_valid(&self) -> bool {
        self.committed.is_some()
    }
}

/// Change detection between committed and current snapshots
#[derive(Debug, Clone)]
pub struct RenderDiff {
    previous: PreviousSnapshot,
    tolerance: f32,
}

impl RenderDiff {
    pub fn new(tolerance: f32) -> Self {
        Self {
            previous: PreviousSnapshot::new(),
            tolerance,
        }
    }

    pub fn previous(&self) -> &PreviousSnapshot {
        &self.previous
    }

    pub fn should_full_redraw(&self, key: FrameKey) -> bool {
        self.previous.should_full_redraw(key)
    }

    /// Regions that must be repainted to show `current`
    pub fn plan(&self, key: FrameKey, current: &Snapshot) -> RedrawPlan {
        let previous = match self.previous.committed.as_ref() {
            Some((k, snapshot)) if *k == key => snapshot,
            _ => return RedrawPlan::full(current),
        };

        let tol = self.tolerance;
        let mut plan = RedrawPlan::default();
        match (previous, current) {
            (Snapshot::Overview { rows: prev }, Snapshot::Overview { rows: cur }) => {
                for (i, row) in cur.iter().enumerate() {
                    let changed = prev.get(i).map_or(true, |p| row_changed(p, row, tol));
                    if changed {
                        plan.push(Region::OverviewRow(row.index));
                    }
                }
            }
            (Snapshot::Detail { channel: prev }, Snapshot::Detail { channel: cur }) => {
                match (prev, cur) {
                    (Some(p), Some(c)) if row_changed(p, c, tol) => plan.push(Region::DetailValue),
                    (Some(_), Some(_)) | (None, None) => {}
                    _ => return RedrawPlan::full(current),
                }
            }
            (Snapshot::Graph { graph: prev }, Snapshot::Graph { graph: cur }) => match (prev, cur) {
                (Some(p), Some(c)) => {
                    if graph_info_changed(p, c, tol) {
                        plan.push(Region::GraphInfo);
                    }
                    if p.stored_total != c.stored_total {
                        plan.push(Region::GraphCurve);
                    }
                }
                (None, None) => {}
                _ => return RedrawPlan::full(current),
            },
            _ => return RedrawPlan::full(current),
        }
        plan
    }

    /// Record `snapshot` as drawn
    pub fn commit(&mut self, key: FrameKey, snapshot: Snapshot) {
        self.previous.commit(key, snapshot);
    }

    /// Record only the regions `plan` repainted from `current`
    pub fn commit_plan(&mut self, key: FrameKey, plan: &RedrawPlan, current: &Snapshot) {
        self.previous.merge(key, plan, current);
    }

    /// Force a full redraw on the next render
    pub fn invalidate(&mut self) {
        self.previous.invalidate();
    }
}
