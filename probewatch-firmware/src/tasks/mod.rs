//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod display_rx;
pub mod host_rx;
pub mod monitor;

pub use display_rx::display_rx_task;
pub use host_rx::host_rx_task;
pub use monitor::{monitor_task, Monitor};
