//! Event dispatch: the application event queue.
//!
//! [`EventBus`] maintains a queue of [`Envelope`]s. Producers (preloader,
//! router) enqueue via `push`; the application loop drains and reacts. The
//! bus does not route or filter — consumers downcast what they care about.

use std::collections::VecDeque;

use super::message::Envelope;

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Queue-based event bus.
#[derive(Debug, Default)]
pub struct EventBus {
    queue: VecDeque<Envelope>,
}

impl EventBus {
    /// Create a new, empty bus.
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Enqueue an event envelope for later processing.
    pub fn push(&mut self, envelope: Envelope) {
        self.queue.push_back(envelope);
    }

    /// Drain all pending events and return them as a `Vec`.
    ///
    /// The queue is empty after this call.
    pub fn drain(&mut self) -> Vec<Envelope> {
        self.queue.drain(..).collect()
    }

    /// Number of pending events.
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
