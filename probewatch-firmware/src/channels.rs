//! Inter-task communication channels
//!
//! The receive tasks only parse bytes; everything they learn is handed to
//! the monitor task through these statics.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use probewatch_protocol::{HostCommand, InputEvent};

/// Channel capacity for button clicks from the display
const INPUT_CHANNEL_SIZE: usize = 8;

/// Channel capacity for host commands
const HOST_CHANNEL_SIZE: usize = 4;

/// Button clicks from the display module
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, InputEvent, INPUT_CHANNEL_SIZE> =
    Channel::new();

/// Commands decoded from the host link
pub static HOST_CHANNEL: Channel<CriticalSectionRawMutex, HostCommand, HOST_CHANNEL_SIZE> =
    Channel::new();

/// Signal that a heartbeat (PING) was received from the display
pub static DISPLAY_PING: Signal<CriticalSectionRawMutex, ()> = Signal::new();
