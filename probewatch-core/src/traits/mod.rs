//! Hardware abstraction traits
//!
//! These traits define the interface between the monitoring engine
//! and hardware-specific implementations. The display seam lives in
//! `probewatch-display` and is re-exported here.

pub mod messaging;
pub mod sensor;

pub use messaging::MessagingClient;
pub use probewatch_display::{DisplayBackend, DisplayError};
pub use sensor::{ChannelId, Reading, SensorBus, SensorError, DISCONNECTED_C};
