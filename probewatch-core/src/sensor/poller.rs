//! Two-phase conversion poller

use crate::time::interval_elapsed;
use crate::traits::{SensorBus, SensorError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PollPhase {
    /// Waiting for the next poll; `None` until the first request
    Idle { last_request_ms: Option<u32> },
    /// Conversion in progress
    Converting { requested_ms: u32 },
}

/// What the poller did this iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollStep {
    /// Nothing due yet
    Waiting,
    /// A conversion was started
    Requested,
    /// The settle delay passed; results can be read now
    Ready,
    /// The bus refused the request; retried next poll interval
    RequestFailed(SensorError),
}

/// Schedules conversion requests and result reads
///
/// A request is issued every `poll_interval_ms`; results become readable
/// `settle_ms` after the request.
#[derive(Debug, Clone)]
pub struct ConversionPoller {
    phase: PollPhase,
    poll_interval_ms: u32,
    settle_ms: u32,
}

impl ConversionPoller {
    /// Create a poller that requests a conversion on its first step
    pub fn new(poll_interval_ms: u32, settle_ms: u32) -> Self {
        Self {
            phase: PollPhase::Idle {
                last_request_ms: None,
            },
            poll_interval_ms,
            settle_ms,
        }
    }

    /// Check if a conversion is in progress
    pub fn is_converting(&self) -> bool {
        matches!(self.phase, PollPhase::Converting { .. })
    }

    /// Advance the poll cycle
    ///
    /// On `Ready` the caller reads every channel before the next step.
    pub fn step<B: SensorBus>(&mut self, bus: &mut B, now_ms: u32) -> PollStep {
        match self.phase {
            PollPhase::Idle { last_request_ms } => {
                let due = match last_request_ms {
                    None => true,
                    Some(last) => interval_elapsed(now_ms, last, self.poll_interval_ms),
                };
                if !due {
                    return PollStep::Waiting;
                }
                match bus.request_conversion() {
                    Ok(()) => {
                        self.phase = PollPhase::Converting {
                            requested_ms: now_ms,
                        };
                        PollStep::Requested
                    }
                    Err(e) => {
                        self.phase = PollPhase::Idle {
                            last_request_ms: Some(now_ms),
                        };
                        PollStep::RequestFailed(e)
                    }
                }
            }
            PollPhase::Converting { requested_ms } => {
                if !interval_elapsed(now_ms, requested_ms, self.settle_ms) {
                    return PollStep::Waiting;
                }
                self.phase = PollPhase::Idle {
                    last_request_ms: Some(requested_ms),
                };
                PollStep::Ready
            }
        }
    }
}
