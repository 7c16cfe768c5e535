//! View mode and selection
//!
//! All navigation is a function of the current view state and an event.
//! Button clicks are queued and drained once per loop iteration.

pub mod events;
pub mod machine;
pub mod queue;

pub use events::ViewEvent;
pub use machine::{FrameKey, Mode, ViewChange, ViewState};
pub use queue::{InputQueue, QueueFull, INPUT_QUEUE_LEN};
