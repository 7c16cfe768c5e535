//! Alarm state machine per channel

use heapless::Vec;

use crate::config::AlarmThresholds;
use crate::time::interval_elapsed;
use crate::traits::Reading;

/// Alarm state of one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmState {
    #[default]
    Normal,
    /// Reading at or above the high threshold
    HighAlarm,
    /// Reading at or below the low threshold
    LowAlarm,
}

impl AlarmState {
    pub fn is_alarm(&self) -> bool {
        !matches!(self, AlarmState::Normal)
    }
}

/// Classify a valid reading against the thresholds
pub fn classify(value: f32, thresholds: &AlarmThresholds) -> AlarmState {
    if value >= thresholds.high_c {
        AlarmState::HighAlarm
    } else if value <= thresholds.low_c {
        AlarmState::LowAlarm
    } else {
        AlarmState::Normal
    }
}

/// What the renderer needs to know about an alarm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmIndicator {
    pub state: AlarmState,
    pub blink_on: bool,
}

/// A change of alarm state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmTransition {
    pub from: AlarmState,
    pub to: AlarmState,
}

/// Alarm and blink state of a single channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelAlarm {
    state: AlarmState,
    blink_on: bool,
    last_toggle_ms: u32,
}

impl ChannelAlarm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AlarmState {
        self.state
    }

    pub fn indicator(&self) -> AlarmIndicator {
        AlarmIndicator {
            state: self.state,
            blink_on: self.blink_on,
        }
    }

    /// Evaluate the latest reading and advance the blink phase
    ///
    /// A disconnected reading holds the previous state. Entering an alarm
    /// starts with the blink phase on; returning to normal forces it off.
    pub fn update(
        &mut self,
        reading: Reading,
        thresholds: &AlarmThresholds,
        blink_interval_ms: u32,
        now_ms: u32,
    ) -> Option<AlarmTransition> {
        let previous = self.state;
        if let Reading::Celsius(value) = reading {
            self.state = classify(value, thresholds);
        }

        if self.state != previous {
            self.blink_on = self.state.is_alarm();
            self.last_toggle_ms = now_ms;
            return Some(AlarmTransition {
                from: previous,
                to: self.state,
            });
        }

        let blink_due = interval_elapsed(now_ms, self.last_toggle_ms, blink_interval_ms);
        if self.state.is_alarm() && blink_due {
            self.blink_on = !self.blink_on;
            self.last_toggle_ms = now_ms;
        }
        None
    }
}

/// Alarms for every channel, sharing thresholds and blink period
#[derive(Debug, Clone)]
pub struct AlarmBank<const C: usize> {
    alarms: Vec<ChannelAlarm, C>,
    thresholds: AlarmThresholds,
    blink_interval_ms: u32,
}

impl<const C: usize> AlarmBank<C> {
    /// Create a bank of `count` channels (bounded by `C`), all normal
    pub fn new(count: usize, thresholds: AlarmThresholds, blink_interval_ms: u32) -> Self {
        let mut alarms = Vec::new();
        for _ in 0..count.min(C) {
            // Bounded by min(C)
            let _ = alarms.push(ChannelAlarm::new());
        }
        Self {
            alarms,
            thresholds,
            blink_interval_ms,
        }
    }

    pub fn len(&self) -> usize {
        self.alarms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alarms.is_empty()
    }

    pub fn thresholds(&self) -> &AlarmThresholds {
        &self.thresholds
    }

    /// Update one channel; unknown indices are ignored
    pub fn update(
        &mut self,
        index: usize,
        reading: Reading,
        now_ms: u32,
    ) -> Option<AlarmTransition> {
        let thresholds = self.thresholds;
        let blink = self.blink_interval_ms;
        self.alarms
            .get_mut(index)?
            .update(reading, &thresholds, blink, now_ms)
    }

    pub fn state(&self, index: usize) -> AlarmState {
        self.alarms
            .get(index)
            .map_or(AlarmState::Normal, ChannelAlarm::state)
    }

    pub fn indicator(&self, index: usize) -> AlarmIndicator {
        self.alarms
            .get(index)
            .map_or(AlarmIndicator::default(), ChannelAlarm::indicator)
    }

    /// Number of channels currently alarmed
    pub fn active_count(&self) -> usize {
        self.alarms.iter().filter(|a| a.state.is_alarm()).count()
    }
}
