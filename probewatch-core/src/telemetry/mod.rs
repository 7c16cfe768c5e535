//! On-demand telemetry
//!
//! A publish request from the host sets a pending flag; the next loop
//! iteration serializes every channel and hands the payload to the
//! messaging client. Link health tracking lives here too, for messaging
//! implementations that infer connectivity from heartbeats.

pub mod link;
pub mod publisher;
pub mod report;

pub use link::{LinkHealth, LinkStatus};
pub use publisher::{PublishOutcome, TelemetryError, TelemetryPublisher, TELEMETRY_SCRATCH_LEN};
pub use report::TelemetryReport;
