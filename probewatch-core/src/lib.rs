//! Board-agnostic monitoring engine for the probe monitor firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (sensor bus, messaging)
//! - Per-channel sample history with derived statistics
//! - Threshold alarms with blink phase
//! - View mode/selection state machine and input queue
//! - Snapshot diffing and region painting
//! - On-demand telemetry publishing
//! - The cooperative `Controller` loop tying it all together
//! - Configuration types and the `monitor.toml` parser

#![no_std]
#![deny(unsafe_code)]

pub mod alarm;
pub mod config;
pub mod controller;
pub mod history;
pub mod render;
pub mod sensor;
pub mod telemetry;
pub mod time;
pub mod traits;
pub mod view;

#[cfg(test)]
mod testing;

pub use controller::{Controller, TickReport};
