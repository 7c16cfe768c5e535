//! Host link messages
//!
//! The host link carries postcard-encoded messages, each COBS-framed and
//! terminated by a `0x00` byte. The controller is passive on this link: it
//! answers pings and publishes telemetry only when the host asks for it.

use heapless::Vec;
use serde::{Deserialize, Serialize};

/// Topic used for telemetry envelopes
pub const TELEMETRY_TOPIC: &str = "probewatch/telemetry";

/// Topic used for heartbeat replies
pub const PONG_TOPIC: &str = "probewatch/pong";

/// Host link errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostError {
    /// Message did not fit the output buffer
    Encode,
    /// Received bytes were not a valid message
    Decode,
    /// A frame exceeded the receive buffer
    Overflow,
}

/// Commands sent by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostCommand {
    /// Keep-alive; the host is listening
    Ping,
    /// Publish a full telemetry report at the next opportunity
    RequestRefresh,
}

impl HostCommand {
    /// Decode a single COBS frame (without the trailing zero)
    ///
    /// The buffer is decoded in place.
    pub fn decode_cobs(frame: &mut [u8]) -> Result<Self, HostError> {
        postcard::from_bytes_cobs(frame).map_err(|_| HostError::Decode)
    }

    /// Encode into `buf` as a COBS frame including the trailing zero
    pub fn encode_cobs<'b>(&self, buf: &'b mut [u8]) -> Result<&'b mut [u8], HostError> {
        postcard::to_slice_cobs(self, buf).map_err(|_| HostError::Encode)
    }
}

/// Outgoing message: an opaque payload published on a topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<'a> {
    pub topic: &'a str,
    pub payload: &'a [u8],
}

impl<'a> Envelope<'a> {
    pub fn new(topic: &'a str, payload: &'a [u8]) -> Self {
        Self { topic, payload }
    }

    /// Encode into `buf` as a COBS frame including the trailing zero
    pub fn encode_cobs<'b>(&self, buf: &'b mut [u8]) -> Result<&'b mut [u8], HostError> {
        postcard::to_slice_cobs(self, buf).map_err(|_| HostError::Encode)
    }
}

/// Collects received bytes into zero-terminated COBS frames
#[derive(Debug, Default)]
pub struct CobsAccumulator<const N: usize> {
    buf: Vec<u8, N>,
    overflowed: bool,
}

impl<const N: usize> CobsAccumulator<N> {
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            overflowed: false,
        }
    }

    /// Feed one byte
    ///
    /// Returns a decoded command when `byte` terminates a frame. An
    /// overlong frame is discarded up to its terminator and reported once.
    pub fn feed(&mut self, byte: u8) -> Option<Result<HostCommand, HostError>> {
        if byte != 0 {
            if self.buf.push(byte).is_err() {
                self.overflowed = true;
            }
            return None;
        }

        let result = if core::mem::take(&mut self.overflowed) {
            Err(HostError::Overflow)
        } else if self.buf.is_empty() {
            self.buf.clear();
            return None;
        } else {
            HostCommand::decode_cobs(&mut self.buf)
        };
        self.buf.clear();
        Some(result)
    }
}
