//! Sensor polling
//!
//! Conversions are requested and read back on different loop iterations
//! so the loop never blocks on a slow bus.

pub mod poller;

pub use poller::{ConversionPoller, PollStep};
