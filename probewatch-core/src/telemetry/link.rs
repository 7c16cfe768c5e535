//! Host link health
//!
//! Tracks heartbeats from the host and reports the link as down once
//! none has arrived within the timeout.

use crate::time::interval_elapsed;

/// Connectivity as seen by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkStatus {
    /// No heartbeat received since boot
    Unknown,
    /// Heartbeat within the timeout
    Up,
    /// Heartbeat overdue
    Down,
}

/// Heartbeat timeout tracker
#[derive(Debug, Clone)]
pub struct LinkHealth {
    timeout_ms: u32,
    last_heartbeat_ms: Option<u32>,
    heartbeats: u32,
}

impl LinkHealth {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            timeout_ms,
            last_heartbeat_ms: None,
            heartbeats: 0,
        }
    }

    /// Record a heartbeat received
    pub fn heartbeat_received(&mut self, now_ms: u32) {
        self.last_heartbeat_ms = Some(now_ms);
        self.heartbeats = self.heartbeats.wrapping_add(1);
    }

    pub fn status(&self, now_ms: u32) -> LinkStatus {
        match self.last_heartbeat_ms {
            None => LinkStatus::Unknown,
            Some(last) if interval_elapsed(now_ms, last, self.timeout_ms) => LinkStatus::Down,
            Some(_) => LinkStatus::Up,
        }
    }

    /// Check if link is healthy
    pub fn is_up(&self, now_ms: u32) -> bool {
        self.status(now_ms) == LinkStatus::Up
    }

    /// Heartbeats received since boot
    pub fn heartbeats(&self) -> u32 {
        self.heartbeats
    }
}
