//! Render snapshots
//!
//! A snapshot captures what one frame shows. Two snapshots of the same
//! frame are compared to find the regions that need repainting.

use heapless::Vec;

use crate::alarm::{AlarmBank, AlarmIndicator};
use crate::config::MAX_CHANNELS;
use crate::history::{SampleStore, Stats};
use crate::traits::ChannelId;
use crate::view::{Mode, ViewState};

/// Displayed state of one channel
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelView {
    /// Index in enumeration order
    pub index: usize,
    pub id: ChannelId,
    /// Last valid reading; `None` until the probe first reports
    pub value: Option<f32>,
    pub alarm: AlarmIndicator,
}

/// Displayed state of the graph page
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GraphView {
    pub channel: ChannelView,
    pub stats: Option<Stats>,
    /// Samples ever stored; changes whenever the curve gains a point
    pub stored_total: u32,
}

/// What one frame shows, per mode
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Snapshot {
    Overview { rows: Vec<ChannelView, MAX_CHANNELS> },
    /// `None` when there are no probes to show
    Detail { channel: Option<ChannelView> },
    /// `None` when there are no probes to show
    Graph { graph: Option<GraphView> },
}

fn channel_view<const C: usize, const N: usize>(
    index: usize,
    store: &SampleStore<C, N>,
    alarms: &AlarmBank<C>,
) -> Option<ChannelView> {
    Some(ChannelView {
        index,
        id: store.channel_id(index)?,
        value: store.last_good(index),
        alarm: alarms.indicator(index),
    })
}

impl Snapshot {
    /// Capture the frame the view currently asks for
    pub fn capture<const C: usize, const N: usize>(
        view: &ViewState,
        store: &SampleStore<C, N>,
        alarms: &AlarmBank<C>,
    ) -> Self {
        match view.mode() {
            Mode::Overview => {
                let mut rows = Vec::new();
                for index in 0..store.channel_count().min(MAX_CHANNELS) {
                    if let Some(row) = channel_view(index, store, alarms) {
                        // Bounded by min(MAX_CHANNELS)
                        let _ = rows.push(row);
                    }
                }
                Snapshot::Overview { rows }
            }
            Mode::Detail => Snapshot::Detail {
                channel: view
                    .selection()
                    .and_then(|index| channel_view(index, store, alarms)),
            },
            Mode::Graph => Snapshot::Graph {
                graph: view.selection().and_then(|index| {
                    Some(GraphView {
                        channel: channel_view(index, store, alarms)?,
                        stats: store.stats(index),
                        stored_total: store.stored_total(index),
                    })
                }),
            },
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Snapshot::Overview { .. } => Mode::Overview,
            Snapshot::Detail { .. } => Mode::Detail,
            Snapshot::Graph { .. } => Mode::Graph,
        }
    }

    /// Check if this frame has no channel to show
    pub fn is_empty(&self) -> bool {
        match self {
            Snapshot::Overview { rows } => rows.is_empty(),
            Snapshot::Detail { channel } => channel.is_none(),
            Snapshot::Graph { graph } => graph.is_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AlarmThresholds;
    use crate::traits::Reading;
    use crate::view::ViewEvent;

    fn fixtures() -> (SampleStore<4, 8>, AlarmBank<4>) {
        let mut store = SampleStore::new(&[ChannelId(10), ChannelId(11)], 8, 0);
        store.record(0, Reading::Celsius(21.0), 0);
        store.record(1, Reading::Celsius(35.0), 0);
        let mut alarms = AlarmBank::new(2, AlarmThresholds::default(), 500);
        alarms.update(1, Reading::Celsius(35.0), 0);
        (store, alarms)
    }

    #[test]
    fn test_overview_has_one_row_per_channel() {
        let (store, alarms) = fixtures();
        let view = ViewState::new(2);
        match Snapshot::capture(&view, &store, &alarms) {
            Snapshot::Overview { rows } => {
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[0].id, ChannelId(10));
                assert_eq!(rows[1].value, Some(35.0));
                assert!(rows[1].alarm.state.is_alarm());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_graph_carries_stats_and_total() {
        let (store, alarms) = fixtures();
        let mut view = ViewState::new(2);
        view.handle(ViewEvent::NextMode);
        view.handle(ViewEvent::NextMode);
        match Snapshot::capture(&view, &store, &alarms) {
            Snapshot::Graph { graph: Some(g) } => {
                assert_eq!(g.channel.index, 0);
                assert_eq!(g.stored_total, 1);
                assert_eq!(g.stats.unwrap().count, 1);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_no_probes_detail_is_empty() {
        let store = SampleStore::<4, 8>::new(&[], 8, 0);
        let alarms = AlarmBank::<4>::new(0, AlarmThresholds::default(), 500);
        let mut view = ViewState::new(0);
        view.handle(ViewEvent::NextMode);
        let snapshot = Snapshot::capture(&view, &store, &alarms);
        assert_eq!(snapshot.mode(), Mode::Detail);
        assert!(snapshot.is_empty());
    }
}
