//! Telemetry message layout
//!
//! The report borrows the sample store and serializes straight from the
//! history rings, so no copy of the history is made.
//!
//! Encoded with postcard as:
//! - `uptime_ms`: u32
//! - `channels`: sequence of `{ id: u8, current: f32, history: [f32] }`
//!
//! `current` carries the disconnected sentinel when the probe has no
//! valid reading; `history` is ordered oldest to newest.

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use crate::history::{SampleRing, SampleStore};
use crate::traits::Reading;

/// Borrowed view of the store, serialized as one telemetry message
pub struct TelemetryReport<'a, const C: usize, const N: usize> {
    pub uptime_ms: u32,
    pub store: &'a SampleStore<C, N>,
}

struct ChannelsSeq<'a, const C: usize, const N: usize>(&'a SampleStore<C, N>);

struct ChannelEntry<'a, const C: usize, const N: usize> {
    store: &'a SampleStore<C, N>,
    index: usize,
}

struct HistorySeq<'a, const N: usize>(Option<&'a SampleRing<N>>);

impl<'a, const C: usize, const N: usize> Serialize for TelemetryReport<'a, C, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("TelemetryReport", 2)?;
        s.serialize_field("uptime_ms", &self.uptime_ms)?;
        s.serialize_field("channels", &ChannelsSeq(self.store))?;
        s.end()
    }
}

impl<'a, const C: usize, const N: usize> Serialize for ChannelsSeq<'a, C, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let store = self.0;
        let entries = (0..store.channel_count()).map(|index| ChannelEntry { store, index });
        serializer.collect_seq(entries)
    }
}

impl<'a, const C: usize, const N: usize> Serialize for ChannelEntry<'a, C, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let id = self.store.channel_id(self.index).map_or(0, |id| id.0);
        let current = self
            .store
            .current_value(self.index)
            .unwrap_or(Reading::Disconnected)
            .to_wire();

        let mut s = serializer.serialize_struct("Channel", 3)?;
        s.serialize_field("id", &id)?;
        s.serialize_field("current", &current)?;
        s.serialize_field("history", &HistorySeq(self.store.history(self.index)))?;
        s.end()
    }
}

impl<'a, const N: usize> Serialize for HistorySeq<'a, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Length must be known up front for postcard
        match self.0 {
            Some(ring) => serializer
                .collect_seq(ring.iter().map(|s| Reading::from_celsius(s.value).to_wire())),
            None => serializer.collect_seq(core::iter::empty::<f32>()),
        }
    }
}
