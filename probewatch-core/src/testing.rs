//! Test doubles for the hardware seams

use heapless::{String, Vec};
use probewatch_display::{Color, DisplayBackend, DisplayError, Point, Rect, TextStyle};

use crate::config::MAX_CHANNELS;
use crate::telemetry::TELEMETRY_SCRATCH_LEN;
use crate::traits::{ChannelId, MessagingClient, Reading, SensorBus, SensorError};

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    Clear(Color),
    ClearRegion(Rect, Color),
    Text(Point, String<32>, TextStyle),
    Line(Point, Point, Color),
    Point(Point, Color),
}

/// Display that records every call instead of drawing
pub struct RecordingDisplay {
    width: u16,
    height: u16,
    calls: Vec<DrawCall, 512>,
    fail_after: Option<usize>,
}

impl RecordingDisplay {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
            fail_after: None,
        }
    }

    /// Fail every call once `n` calls have been recorded
    pub fn fail_after(&mut self, n: usize) {
        self.fail_after = Some(n);
    }

    pub fn recover(&mut self) {
        self.fail_after = None;
    }

    /// Forget recorded calls
    pub fn reset(&mut self) {
        self.calls.clear();
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn clears(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Clear(_)))
            .count()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Text(_, text, _) => Some(text.as_str()),
            _ => None,
        })
    }

    fn record(&mut self, call: DrawCall) -> Result<(), DisplayError> {
        if self.fail_after.is_some_and(|n| self.calls.len() >= n) {
            return Err(DisplayError::Communication);
        }
        self.calls
            .push(call)
            .map_err(|_| DisplayError::BufferOverflow)
    }
}

impl DisplayBackend for RecordingDisplay {
    fn clear(&mut self, color: Color) -> Result<(), DisplayError> {
        self.record(DrawCall::Clear(color))
    }

    fn clear_region(&mut self, region: Rect, color: Color) -> Result<(), DisplayError> {
        self.record(DrawCall::ClearRegion(region, color))
    }

    fn draw_text(&mut self, at: Point, text: &str, style: TextStyle) -> Result<(), DisplayError> {
        let mut owned = String::new();
        for c in text.chars() {
            if owned.push(c).is_err() {
                break;
            }
        }
        self.record(DrawCall::Text(at, owned, style))
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color) -> Result<(), DisplayError> {
        self.record(DrawCall::Line(from, to, color))
    }

    fn draw_point(&mut self, at: Point, color: Color) -> Result<(), DisplayError> {
        self.record(DrawCall::Point(at, color))
    }

    fn dimensions(&self) -> (u16, u16) {
        (self.width, self.height)
    }
}

/// Sensor bus with scripted readings; channel `i` has id `i`
pub struct FakeBus {
    readings: Vec<Reading, MAX_CHANNELS>,
    conversions: u32,
    fail_requests: bool,
}

impl FakeBus {
    pub fn new(readings: &[Reading]) -> Self {
        Self {
            readings: Vec::from_slice(readings).unwrap(),
            conversions: 0,
            fail_requests: false,
        }
    }

    pub fn set_reading(&mut self, index: usize, reading: Reading) {
        self.readings[index] = reading;
    }

    pub fn fail_requests(&mut self, fail: bool) {
        self.fail_requests = fail;
    }

    /// Conversion requests accepted so far
    pub fn conversions(&self) -> u32 {
        self.conversions
    }
}

impl SensorBus for FakeBus {
    fn enumerate(&mut self) -> Vec<ChannelId, MAX_CHANNELS> {
        (0..self.readings.len() as u8).map(ChannelId).collect()
    }

    fn request_conversion(&mut self) -> Result<(), SensorError> {
        if self.fail_requests {
            return Err(SensorError::ConversionError);
        }
        self.conversions += 1;
        Ok(())
    }

    fn read_value(&mut self, id: ChannelId) -> Reading {
        self.readings
            .get(usize::from(id.0))
            .copied()
            .unwrap_or(Reading::Disconnected)
    }
}

/// Messaging client that keeps the last published message
pub struct FakeMessaging {
    connected: bool,
    accepting: bool,
    publishes: u32,
    services: u32,
    last_topic: Option<String<32>>,
    last_payload: Vec<u8, TELEMETRY_SCRATCH_LEN>,
}

impl FakeMessaging {
    pub fn new(connected: bool) -> Self {
        Self {
            connected,
            accepting: true,
            publishes: 0,
            services: 0,
            last_topic: None,
            last_payload: Vec::new(),
        }
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// Make `publish` report delivery failure
    pub fn set_accepting(&mut self, accepting: bool) {
        self.accepting = accepting;
    }

    pub fn publish_count(&self) -> u32 {
        self.publishes
    }

    pub fn service_count(&self) -> u32 {
        self.services
    }

    pub fn last_topic(&self) -> Option<&str> {
        self.last_topic.as_ref().map(|t| t.as_str())
    }

    pub fn last_payload(&self) -> &[u8] {
        &self.last_payload
    }
}

impl MessagingClient for FakeMessaging {
    fn service(&mut self, _now_ms: u32) {
        self.services += 1;
    }

    fn connected(&self) -> bool {
        self.connected
    }

    fn publish(&mut self, topic: &str, payload: &[u8]) -> bool {
        self.publishes += 1;
        self.last_topic = String::try_from(topic).ok();
        self.last_payload = Vec::from_slice(payload).unwrap();
        self.accepting
    }
}
