//! Demand-driven telemetry publisher

use probewatch_protocol::TELEMETRY_TOPIC;

use super::report::TelemetryReport;
use crate::history::SampleStore;
use crate::traits::MessagingClient;

/// Scratch buffer size that fits a full report
///
/// Eight channels of 120 samples encode to just under 4 KiB.
pub const TELEMETRY_SCRATCH_LEN: usize = 4096;

/// Telemetry encoding errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TelemetryError {
    /// Report did not fit the scratch buffer
    BufferTooSmall,
    /// Serializer rejected the report
    Encode,
}

/// What happened to a pending publish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PublishOutcome {
    /// No publish was requested
    Idle,
    /// Link down; request kept for later
    Offline,
    /// Report built and handed over; request cleared
    Published { bytes: usize, delivered: bool },
    /// Report could not be built; request kept
    Failed(TelemetryError),
}

/// Pending-request flag and publish bookkeeping
#[derive(Debug, Clone, Default)]
pub struct TelemetryPublisher {
    pending: bool,
    published: u32,
}

impl TelemetryPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a report on the next publish attempt
    pub fn request(&mut self) {
        self.pending = true;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Reports handed to the messaging client so far
    pub fn published_count(&self) -> u32 {
        self.published
    }

    /// Publish a report if one is pending
    ///
    /// The flag clears once the report is encoded, whether or not the
    /// transport accepts it. While offline or on an encoding failure the
    /// flag stays set.
    pub fn publish<M: MessagingClient, const C: usize, const N: usize>(
        &mut self,
        messaging: &mut M,
        store: &SampleStore<C, N>,
        uptime_ms: u32,
        scratch: &mut [u8],
    ) -> PublishOutcome {
        if !self.pending {
            return PublishOutcome::Idle;
        }
        if !messaging.connected() {
            return PublishOutcome::Offline;
        }

        let report = TelemetryReport { uptime_ms, store };
        let payload = match postcard::to_slice(&report, scratch) {
            Ok(bytes) => bytes,
            Err(postcard::Error::SerializeBufferFull) => {
                return PublishOutcome::Failed(TelemetryError::BufferTooSmall)
            }
            Err(_) => return PublishOutcome::Failed(TelemetryError::Encode),
        };

        self.pending = false;
        let delivered = messaging.publish(TELEMETRY_TOPIC, payload);
        self.published = self.published.wrapping_add(1);
        PublishOutcome::Published {
            bytes: payload.len(),
            delivered,
        }
    }
}
