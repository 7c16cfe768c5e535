//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in probewatch-core:
//!
//! - NTC thermistor probes on a multiplexed ADC (`SensorBus`)
//! - Serial host link with COBS-framed envelopes (`MessagingClient`)

#![no_std]
#![deny(unsafe_code)]

pub mod host;
pub mod sensor;
