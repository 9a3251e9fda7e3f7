//! Event trait, envelope, and built-in application events.
//!
//! The [`AppEvent`] trait is object-safe and supports downcasting via `Any`.
//! [`Envelope`] wraps a boxed event with a `handled` flag. Built-in events:
//! [`PreloaderHidden`], [`RouteActivated`], [`Quit`].

use std::any::Any;
use std::time::Duration;

// ---------------------------------------------------------------------------
// AppEvent trait
// ---------------------------------------------------------------------------

/// Object-safe application event.
///
/// All events implement `as_any` for downcasting and `event_name` for
/// debug/logging purposes.
pub trait AppEvent: Send + 'static {
    /// Upcast to `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Human-readable name for this event type.
    fn event_name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Wraps a boxed event for queueing on the [`EventBus`](super::handler::EventBus).
pub struct Envelope {
    /// The event payload.
    pub event: Box<dyn AppEvent>,
    /// Whether this event has been handled (stops further processing).
    pub handled: bool,
}

impl Envelope {
    /// Create a new, unhandled envelope.
    pub fn new(event: impl AppEvent) -> Self {
        Self {
            event: Box::new(event),
            handled: false,
        }
    }

    /// Attempt to downcast the event to a concrete type.
    pub fn downcast_ref<T: AppEvent + 'static>(&self) -> Option<&T> {
        self.event.as_any().downcast_ref::<T>()
    }

    /// Mark this envelope as handled.
    pub fn mark_handled(&mut self) {
        self.handled = true;
    }
}

impl std::fmt::Debug for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Envelope")
            .field("event_name", &self.event.event_name())
            .field("handled", &self.handled)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Built-in events
// ---------------------------------------------------------------------------

/// Dispatched once when the splash/preloader sequence completes.
///
/// External observers (diagnostics, tests) may read `total_time` — the full
/// duration the preloader was on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreloaderHidden {
    /// How long the preloader ran before hiding.
    pub total_time: Duration,
}

impl AppEvent for PreloaderHidden {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn event_name(&self) -> &str {
        "PreloaderHidden"
    }
}

/// Dispatched after a navigation installs its page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteActivated {
    /// The resolved route path (post-redirect).
    pub path: String,
}

impl AppEvent for RouteActivated {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn event_name(&self) -> &str {
        "RouteActivated"
    }
}

/// Request application shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quit;

impl AppEvent for Quit {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn event_name(&self) -> &str {
        "Quit"
    }
}

// ===========================================================================
// Tests
// ===========================================================================
