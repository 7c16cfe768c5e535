//! Bounded input event queue

use heapless::Deque;

use super::events::ViewEvent;

/// Depth of the input queue
pub const INPUT_QUEUE_LEN: usize = 16;

/// Returned when an event is pushed onto a full queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QueueFull(pub ViewEvent);

/// FIFO of pending view events
#[derive(Debug, Clone, Default)]
pub struct InputQueue<const N: usize> {
    events: Deque<ViewEvent, N>,
}

impl<const N: usize> InputQueue<N> {
    pub fn new() -> Self {
        Self {
            events: Deque::new(),
        }
    }

    /// Enqueue an event; a full queue drops it and reports it back
    pub fn push(&mut self, event: ViewEvent) -> Result<(), QueueFull> {
        self.events.push_back(event).map_err(QueueFull)
    }

    pub fn pop(&mut self) -> Option<ViewEvent> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
