//! Probewatch wire protocol
//!
//! Two serial links leave the controller:
//!
//! - **Display link** (UART0): the display module is a "dumb terminal". It
//!   renders region-scoped drawing commands and reports debounced button
//!   clicks. Messages use a small binary frame:
//!
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 1B     │ 1B   │ 0–250B      │ 1B       │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! - **Host link** (UART1): postcard-encoded, COBS-delimited messages. The
//!   host sends [`HostCommand`]s; the controller answers with topic/payload
//!   [`Envelope`]s carrying telemetry.

#![no_std]
#![deny(unsafe_code)]

pub mod events;
pub mod frame;
pub mod host;
pub mod messages;

pub use events::InputEvent;
pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE};
pub use host::{CobsAccumulator, Envelope, HostCommand, HostError, TELEMETRY_TOPIC};
pub use messages::{ControllerMessage, DisplayCommand};
