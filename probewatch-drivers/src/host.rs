//! Serial host link
//!
//! Implements [`MessagingClient`] on top of a byte sink. Outgoing messages
//! are postcard [`Envelope`]s framed with COBS. The host is considered
//! connected while its pings keep arriving within the link timeout.

use embedded_io::Write;
use probewatch_core::telemetry::{LinkHealth, TELEMETRY_SCRATCH_LEN};
use probewatch_core::traits::MessagingClient;
use probewatch_protocol::host::PONG_TOPIC;
use probewatch_protocol::Envelope;

/// Room for the largest telemetry payload plus topic and COBS overhead
///
/// Also the size of the UART transmit ring, so one publish fits without
/// blocking on the wire.
pub const HOST_TX_LEN: usize = TELEMETRY_SCRATCH_LEN + 64;

/// Messaging client over a serial writer
pub struct SerialHost<W> {
    writer: W,
    health: LinkHealth,
    connected: bool,
    /// A ping arrived and has not been answered yet
    pong_owed: bool,
    write_errors: u32,
    tx_buf: [u8; HOST_TX_LEN],
}

impl<W: Write> SerialHost<W> {
    pub fn new(writer: W, timeout_ms: u32) -> Self {
        Self {
            writer,
            health: LinkHealth::new(timeout_ms),
            connected: false,
            pong_owed: false,
            write_errors: 0,
            tx_buf: [0; HOST_TX_LEN],
        }
    }

    /// Record a ping from the host
    ///
    /// The link counts as up immediately; the pong goes out on the next
    /// `service` call.
    pub fn heartbeat_received(&mut self, now_ms: u32) {
        self.health.heartbeat_received(now_ms);
        self.connected = true;
        self.pong_owed = true;
    }

    pub fn health(&self) -> &LinkHealth {
        &self.health
    }

    /// Messages that failed to encode or write
    pub fn write_errors(&self) -> u32 {
        self.write_errors
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.writer
    }

    fn send(&mut self, topic: &str, payload: &[u8]) -> bool {
        let sent = match Envelope::new(topic, payload).encode_cobs(&mut self.tx_buf) {
            Ok(frame) => self.writer.write_all(frame).is_ok(),
            Err(_) => false,
        };
        if !sent {
            self.write_errors = self.write_errors.wrapping_add(1);
        }
        sent
    }
}

impl<W: Write> MessagingClient for SerialHost<W> {
    fn service(&mut self, now_ms: u32) {
        self.connected = self.health.is_up(now_ms);
        if self.connected && self.pong_owed {
            self.pong_owed = false;
            self.send(PONG_TOPIC, &[]);
        }
    }

    fn connected(&self) -> bool {
        self.connected
    }

    fn publish(&mut self, topic: &str, payload: &[u8]) -> bool {
        if !self.connected {
            return false;
        }
        self.send(topic, payload)
    }
}
