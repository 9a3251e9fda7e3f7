//! Pilot: programmatic interaction with a headless [`App`].
//!
//! The pilot drives the app the way a user would — navigate, scroll, type,
//! submit — and exposes the state a test wants to assert on. Time is pumped
//! with [`settle_for`](Pilot::settle_for), which interleaves small tokio
//! sleeps with app ticks; under a paused runtime the sleeps resolve on the
//! virtual clock, so tests are fast and deterministic.

use std::sync::Arc;
use std::time::Duration;

use crate::app::{App, AppConfig};
use crate::event::{Envelope, InputEvent, Key};
use crate::form::MessageSender;
use crate::geometry::Size;
use crate::render::Line;
use crate::route::RouteError;
use crate::view::View;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless app driver for tests.
///
/// # Examples
///
/// ```ignore
/// let mut pilot = Pilot::new(80, 24);
/// pilot.navigate("/contact");
/// pilot.settle_for(Duration::from_millis(200)).await;
/// assert_eq!(pilot.title(), "Contact | Uma Shankar");
/// ```
pub struct Pilot {
    app: App,
}

impl Pilot {
    /// Tick granularity used by [`settle_for`](Self::settle_for).
    pub const STEP: Duration = Duration::from_millis(25);

    /// Create a pilot with the default test config: no splash, a short
    /// bundle-fetch delay, the standard delivery delay.
    pub fn new(width: i32, height: i32) -> Result<Self, RouteError> {
        Self::with_config(
            AppConfig::new()
                .without_splash()
                .with_fetch_delay(Duration::from_millis(50)),
            width,
            height,
        )
    }

    /// Create a pilot from an explicit config.
    pub fn with_config(config: AppConfig, width: i32, height: i32) -> Result<Self, RouteError> {
        Ok(Self {
            app: App::new(config, Size::new(width, height))?,
        })
    }

    /// Replace the message transport (builder).
    pub fn with_sender(mut self, sender: Arc<dyn MessageSender>) -> Self {
        self.app = self.app.with_sender(sender);
        self
    }

    // ── Driving ──────────────────────────────────────────────────────

    /// Start a navigation.
    pub fn navigate(&mut self, path: &str) {
        self.app.request_navigate(path);
    }

    /// Pump time and ticks for `total` duration in [`STEP`](Self::STEP)
    /// increments, letting spawned loads and sends complete.
    pub async fn settle_for(&mut self, total: Duration) {
        let mut elapsed = Duration::ZERO;
        while elapsed < total {
            tokio::time::sleep(Self::STEP).await;
            tokio::task::yield_now().await;
            self.app.tick(Self::STEP);
            elapsed += Self::STEP;
        }
    }

    /// Advance a single app tick without sleeping.
    pub fn tick(&mut self, dt: Duration) {
        self.app.tick(dt);
    }

    /// Simulate a key press.
    pub fn press_key(&mut self, key: Key) {
        self.app.handle_input(InputEvent::Key(key));
    }

    /// Type each character of `text` into the app.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.press_key(Key::Char(ch));
        }
    }

    /// Scroll the view by `delta` rows.
    pub fn scroll_by(&mut self, delta: i32) {
        self.app.handle_input(InputEvent::Scroll(delta));
    }

    /// Scroll to an absolute offset via Home and a relative delta.
    pub fn scroll_to(&mut self, offset: i32) {
        self.press_key(Key::Home);
        self.scroll_by(offset);
    }

    /// Simulate a terminal resize.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.app.handle_input(InputEvent::Resize { width, height });
    }

    // ── Inspection ───────────────────────────────────────────────────

    /// The underlying app.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Mutable access to the underlying app.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// The active page title.
    pub fn title(&self) -> &str {
        self.app.title()
    }

    /// The mounted view.
    pub fn view(&self) -> Option<&View> {
        self.app.view()
    }

    /// Whether the app is still running.
    pub fn is_running(&self) -> bool {
        self.app.is_running()
    }

    /// Texts of the active notifications, oldest first.
    pub fn notification_texts(&self) -> Vec<String> {
        self.app
            .notifications()
            .active()
            .iter()
            .map(|n| n.text.clone())
            .collect()
    }

    /// Drain application events.
    pub fn events(&mut self) -> Vec<Envelope> {
        self.app.drain_events()
    }

    /// A form field's current value, if the mounted page has a form.
    pub fn form_value(&self, name: &str) -> Option<String> {
        self.app
            .view()?
            .form()?
            .field(name)
            .map(|f| f.value().to_owned())
    }

    /// Render the current frame.
    pub fn render(&self) -> Vec<Line> {
        self.app.render()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
