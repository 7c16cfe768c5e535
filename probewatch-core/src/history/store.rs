//! Sample store: current readings, history rings and statistics

use heapless::Vec;

use super::ring::{Sample, SampleRing};
use crate::time::interval_elapsed;
use crate::traits::{ChannelId, Reading};

/// Statistics over a channel's stored samples
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Stats {
    pub min: f32,
    pub max: f32,
    pub avg: f32,
    /// Samples the statistics cover; 0 when derived from the current value
    pub count: usize,
}

impl Stats {
    /// Degenerate statistics for a single value not yet stored
    fn from_value(value: f32) -> Self {
        Self {
            min: value,
            max: value,
            avg: value,
            count: 0,
        }
    }

    /// Full scan over the live window
    fn scan<const N: usize>(ring: &SampleRing<N>) -> Option<Self> {
        let mut iter = ring.iter();
        let first = iter.next()?.value;
        let (mut min, mut max, mut sum) = (first, first, f64::from(first));
        let mut count = 1usize;
        for sample in iter {
            min = min.min(sample.value);
            max = max.max(sample.value);
            sum += f64::from(sample.value);
            count += 1;
        }
        // Rounding must not push the mean outside the observed range
        let avg = ((sum / count as f64) as f32).max(min).min(max);
        Some(Self {
            min,
            max,
            avg,
            count,
        })
    }
}

/// Result of offering a reading to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordOutcome {
    /// Sample appended to history
    Stored,
    /// Current value updated; store interval not yet elapsed
    Deferred,
    /// Reading was disconnected; history untouched
    Disconnected,
    /// No channel at that index
    Ignored,
}

#[derive(Debug, Clone)]
struct ChannelHistory<const N: usize> {
    id: ChannelId,
    current: Reading,
    last_good: Option<f32>,
    ring: SampleRing<N>,
    last_store_ms: Option<u32>,
    stored_total: u32,
    stats: Option<Stats>,
}

impl<const N: usize> ChannelHistory<N> {
    fn new(id: ChannelId, capacity: usize) -> Self {
        Self {
            id,
            current: Reading::Disconnected,
            last_good: None,
            ring: SampleRing::new(capacity),
            last_store_ms: None,
            stored_total: 0,
            stats: None,
        }
    }
}

/// History and statistics for every discovered channel
///
/// `C` bounds the number of channels, `N` the samples per channel.
/// Channels are addressed by their index in enumeration order.
#[derive(Debug, Clone)]
pub struct SampleStore<const C: usize, const N: usize> {
    channels: Vec<ChannelHistory<N>, C>,
    store_interval_ms: u32,
}

impl<const C: usize, const N: usize> SampleStore<C, N> {
    /// Create a store for the given channels
    ///
    /// Channels beyond `C` are ignored; `capacity` is clamped to `1..=N`.
    pub fn new(ids: &[ChannelId], capacity: usize, store_interval_ms: u32) -> Self {
        let mut channels = Vec::new();
        for &id in ids.iter().take(C) {
            // Bounded by take(C)
            let _ = channels.push(ChannelHistory::new(id, capacity));
        }
        Self {
            channels,
            store_interval_ms,
        }
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn channel_id(&self, index: usize) -> Option<ChannelId> {
        self.channels.get(index).map(|ch| ch.id)
    }

    /// Channel ids in enumeration order
    pub fn ids(&self) -> impl Iterator<Item = ChannelId> + '_ {
        self.channels.iter().map(|ch| ch.id)
    }

    /// Offer the latest poll result for a channel
    ///
    /// The current value always follows the poll. A valid reading is
    /// appended to history only if the store interval has elapsed since
    /// the last stored sample; the first valid reading is always stored.
    pub fn record(&mut self, index: usize, reading: Reading, now_ms: u32) -> RecordOutcome {
        let interval = self.store_interval_ms;
        let Some(ch) = self.channels.get_mut(index) else {
            return RecordOutcome::Ignored;
        };

        let reading = match reading {
            Reading::Celsius(v) => Reading::from_celsius(v),
            Reading::Disconnected => Reading::Disconnected,
        };
        ch.current = reading;

        let Reading::Celsius(value) = reading else {
            return RecordOutcome::Disconnected;
        };
        ch.last_good = Some(value);

        let due = match ch.last_store_ms {
            None => true,
            Some(last) => interval_elapsed(now_ms, last, interval),
        };
        if !due {
            return RecordOutcome::Deferred;
        }

        ch.ring.push(Sample {
            timestamp_ms: now_ms,
            value,
        });
        ch.last_store_ms = Some(now_ms);
        ch.stored_total = ch.stored_total.wrapping_add(1);
        ch.stats = Stats::scan(&ch.ring);
        RecordOutcome::Stored
    }

    /// Latest poll result, including disconnections
    pub fn current_value(&self, index: usize) -> Option<Reading> {
        self.channels.get(index).map(|ch| ch.current)
    }

    /// Last valid reading; frozen while the probe is disconnected
    pub fn last_good(&self, index: usize) -> Option<f32> {
        self.channels.get(index).and_then(|ch| ch.last_good)
    }

    /// Statistics over stored samples
    ///
    /// Before anything is stored, falls back to the current value with a
    /// count of zero. `None` when there is no value at all.
    pub fn stats(&self, index: usize) -> Option<Stats> {
        let ch = self.channels.get(index)?;
        ch.stats
            .or_else(|| ch.current.celsius().map(Stats::from_value))
    }

    /// Stored samples, oldest first
    pub fn history(&self, index: usize) -> Option<&SampleRing<N>> {
        self.channels.get(index).map(|ch| &ch.ring)
    }

    /// Number of samples ever stored for a channel
    ///
    /// Keeps counting after the ring wraps, unlike `Stats::count`.
    pub fn stored_total(&self, index: usize) -> u32 {
        self.channels.get(index).map_or(0, |ch| ch.stored_total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(interval: u32) -> SampleStore<4, 8> {
        SampleStore::new(&[ChannelId(1), ChannelId(2)], 4, interval)
    }

    #[test]
    fn test_first_valid_sample_always_stored() {
        let mut s = store(5000);
        assert_eq!(s.record(0, Reading::Celsius(20.0), 1), RecordOutcome::Stored);
        assert_eq!(s.history(0).unwrap().len(), 1);
        assert_eq!(s.stored_total(0), 1);
    }

    #[test]
    fn test_store_interval_gates_history_not_current() {
        let mut s = store(5000);
        s.record(0, Reading::Celsius(20.0), 0);
        assert_eq!(
            s.record(0, Reading::Celsius(21.0), 1000),
            RecordOutcome::Deferred
        );
        assert_eq!(s.current_value(0), Some(Reading::Celsius(21.0)));
        assert_eq!(s.history(0).unwrap().len(), 1);

        assert_eq!(
            s.record(0, Reading::Celsius(22.0), 5000),
            RecordOutcome::Stored
        );
        assert_eq!(s.history(0).unwrap().len(), 2);
    }

    #[test]
    fn test_disconnected_never_stored() {
        let mut s = store(0);
        s.record(0, Reading::Celsius(20.0), 0);
        assert_eq!(
            s.record(0, Reading::Disconnected, 100),
            RecordOutcome::Disconnected
        );
        assert_eq!(
            s.record(0, Reading::Celsius(f32::NAN), 200),
            RecordOutcome::Disconnected
        );
        assert_eq!(s.history(0).unwrap().len(), 1);
        assert_eq!(s.current_value(0), Some(Reading::Disconnected));
        assert_eq!(s.last_good(0), Some(20.0));
        assert_eq!(s.stats(0).unwrap().count, 1);
    }

    #[test]
    fn test_stats_over_window() {
        let mut s = store(0);
        for (t, v) in [10.0, 30.0, 20.0].into_iter().enumerate() {
            s.record(0, Reading::Celsius(v), t as u32);
        }
        let stats = s.stats(0).unwrap();
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 30.0);
        assert_eq!(stats.avg, 20.0);
        assert_eq!(stats.count, 3);
    }

    #[test]
    fn test_stats_follow_eviction() {
        let mut s = store(0);
        for (t, v) in [50.0, 1.0, 2.0, 3.0, 4.0].into_iter().enumerate() {
            s.record(0, Reading::Celsius(v), t as u32);
        }
        let stats = s.stats(0).unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.max, 4.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(s.stored_total(0), 5);
    }

    #[test]
    fn test_stats_absent_without_value() {
        let mut s = store(0);
        assert_eq!(s.stats(0), None);
        s.record(0, Reading::Disconnected, 0);
        assert_eq!(s.stats(0), None);
    }

    #[test]
    fn test_unknown_channel_is_ignored() {
        let mut s = store(0);
        assert_eq!(s.record(7, Reading::Celsius(1.0), 0), RecordOutcome::Ignored);
        assert_eq!(s.current_value(7), None);
        assert_eq!(s.stored_total(7), 0);
    }

    #[test]
    fn test_channels_beyond_bound_are_dropped() {
        let ids = [ChannelId(0), ChannelId(1), ChannelId(2)];
        let s = SampleStore::<2, 4>::new(&ids, 4, 0);
        assert_eq!(s.channel_count(), 2);
        assert_eq!(s.channel_id(1), Some(ChannelId(1)));
        assert_eq!(s.channel_id(2), None);
    }

    #[test]
    fn test_interval_survives_clock_wrap() {
        let mut s = store(1000);
        s.record(0, Reading::Celsius(1.0), u32::MAX - 100);
        assert_eq!(
            s.record(0, Reading::Celsius(2.0), 500),
            RecordOutcome::Deferred
        );
        assert_eq!(s.record(0, Reading::Celsius(3.0), 900), RecordOutcome::Stored);
    }
}
