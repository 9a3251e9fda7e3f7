//! The splash preloader shown before the first page.
//!
//! A timed sequence advanced by the app clock. While running, the frame shows
//! its overlay instead of the page; on completion the preloader hides itself
//! and dispatches [`PreloaderHidden`] with the total time on screen, for any
//! external observer subscribed to the bus.

use std::time::Duration;

use crate::event::{Envelope, EventBus, PreloaderHidden};
use crate::page::Section;

// ---------------------------------------------------------------------------
// Preloader
// ---------------------------------------------------------------------------

/// Splash sequence state.
#[derive(Debug)]
pub struct Preloader {
    duration: Duration,
    elapsed: Duration,
    hidden: bool,
}

impl Preloader {
    /// Create a preloader that runs for `duration`.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
            hidden: false,
        }
    }

    /// Advance the sequence. Dispatches [`PreloaderHidden`] exactly once,
    /// the tick the sequence completes.
    pub fn tick(&mut self, dt: Duration, bus: &mut EventBus) {
        if self.hidden {
            return;
        }
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.hidden = true;
            bus.push(Envelope::new(PreloaderHidden { total_time: self.elapsed }));
        }
    }

    /// Progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Whether the splash has finished and hidden itself.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// The overlay block, carrying the accessibility contract markers the
    /// external diagnostics rely on.
    pub fn overlay(&self) -> Section {
        let percent = (self.progress() * 100.0).round() as u32;
        Section::new()
            .with_class("preloader-overlay")
            .with_attr("role", "status")
            .with_attr("aria-live", "polite")
            .with_attr("aria-label", "Loading portfolio")
            .with_line("UMA SHANKAR")
            .with_line(format!("Loading... {percent}%"))
    }
}

// ===========================================================================
// Tests
// ===========================================================================
