//! Threshold alarms
//!
//! Each channel carries an alarm state and a blink phase used to
//! emphasise alarmed values on screen.

pub mod evaluator;

pub use evaluator::{
    classify, AlarmBank, AlarmIndicator, AlarmState, AlarmTransition, ChannelAlarm,
};
