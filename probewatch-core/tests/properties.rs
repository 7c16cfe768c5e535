//! Property tests for store, alarm and view invariants

use probewatch_core::alarm::{classify, AlarmState};
use probewatch_core::config::AlarmThresholds;
use probewatch_core::history::{Sample, SampleRing, SampleStore};
use probewatch_core::render::value_changed;
use probewatch_core::traits::{ChannelId, Reading};
use probewatch_core::view::{Mode, ViewEvent, ViewState};
use proptest::prelude::*;

fn arb_reading() -> impl Strategy<Value = Reading> {
    prop_oneof![
        4 => (-55.0f32..125.0).prop_map(Reading::Celsius),
        1 => Just(Reading::Disconnected),
        1 => Just(Reading::Celsius(f32::NAN)),
    ]
}

fn arb_view_event() -> impl Strategy<Value = ViewEvent> {
    prop_oneof![
        Just(ViewEvent::NextMode),
        Just(ViewEvent::SelectNext),
        Just(ViewEvent::SelectPrev),
        Just(ViewEvent::TogglePower),
    ]
}

proptest! {
    #[test]
    fn ring_never_exceeds_capacity(
        capacity in 1usize..=16,
        values in prop::collection::vec(-50.0f32..50.0, 0..64),
    ) {
        let mut ring = SampleRing::<16>::new(capacity);
        for (t, v) in values.iter().enumerate() {
            ring.push(Sample { timestamp_ms: t as u32, value: *v });
            prop_assert!(ring.len() <= capacity);
        }
        prop_assert_eq!(ring.len(), values.len().min(capacity));

        // Oldest first, holding the most recent values
        let kept: Vec<f32> = ring.iter().map(|s| s.value).collect();
        let start = values.len() - kept.len();
        prop_assert_eq!(kept.as_slice(), &values[start..]);
    }

    #[test]
    fn stats_are_ordered(readings in prop::collection::vec(arb_reading(), 1..200)) {
        let mut store = SampleStore::<1, 32>::new(&[ChannelId(0)], 32, 0);
        for (t, r) in readings.iter().enumerate() {
            store.record(0, *r, t as u32);
            if let Some(stats) = store.stats(0) {
                prop_assert!(stats.min <= stats.avg);
                prop_assert!(stats.avg <= stats.max);
                prop_assert!(stats.count <= 32);
            }
        }
    }

    #[test]
    fn history_holds_only_valid_readings(readings in prop::collection::vec(arb_reading(), 0..100)) {
        let mut store = SampleStore::<1, 16>::new(&[ChannelId(0)], 16, 0);
        for (t, r) in readings.iter().enumerate() {
            store.record(0, *r, t as u32);
        }
        let ring = store.history(0).unwrap();
        prop_assert!(ring.iter().all(|s| s.value.is_finite()));
    }

    #[test]
    fn classify_respects_thresholds(value in -100.0f32..150.0) {
        let thresholds = AlarmThresholds { high_c: 30.0, low_c: 10.0 };
        let expected = if value >= 30.0 {
            AlarmState::HighAlarm
        } else if value <= 10.0 {
            AlarmState::LowAlarm
        } else {
            AlarmState::Normal
        };
        prop_assert_eq!(classify(value, &thresholds), expected);
    }

    #[test]
    fn selection_stays_valid(
        channels in 0usize..=8,
        events in prop::collection::vec(arb_view_event(), 0..64),
    ) {
        let mut view = ViewState::new(channels);
        for event in events {
            view.handle(event);
            match view.selection() {
                Some(index) => prop_assert!(index < channels),
                None => prop_assert!(channels == 0 || view.mode() == Mode::Overview),
            }
        }
    }

    #[test]
    fn three_mode_presses_return_to_start(
        channels in 0usize..=8,
        prefix in prop::collection::vec(arb_view_event(), 0..16),
    ) {
        let mut view = ViewState::new(channels);
        for event in prefix {
            view.handle(event);
        }
        let start = view.mode();
        for _ in 0..3 {
            view.handle(ViewEvent::NextMode);
        }
        prop_assert_eq!(view.mode(), start);
    }

    #[test]
    fn value_change_is_symmetric(a in -50.0f32..50.0, b in -50.0f32..50.0, tol in 0.0f32..2.0) {
        prop_assert_eq!(
            value_changed(Some(a), Some(b), tol),
            value_changed(Some(b), Some(a), tol)
        );
    }
}
