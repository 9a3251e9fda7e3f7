//! App struct: configuration, input handling, the tick loop, navigation.
//!
//! [`App`] ties together the router, the mounted view, the preloader, the
//! notification center, and the event bus. It is headless by construction:
//! the binary owns the terminal driver and pulls frames via
//! [`render`](App::render), so tests drive the app directly.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::event::{Envelope, EventBus, InputEvent, Key, Quit, RouteActivated};
use crate::form::{MessageSender, FormEvent, SimulatedSender, SubmitOutcome};
use crate::geometry::Size;
use crate::notify::{NotificationCenter, NotifyLevel};
use crate::page::portfolio_routes;
use crate::preloader::Preloader;
use crate::render::{page_frame, splash_frame, Line};
use crate::route::{PendingNavigation, PreloadStrategy, RouteError, RouteLoader, Router};
use crate::state::{DirtyFlag, StateCell};
use crate::view::View;

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Target frames per second for the binary's render loop.
    pub fps: u32,
    /// Simulated bundle-fetch delay for cold routes.
    pub fetch_delay: Duration,
    /// Simulated contact-form delivery delay.
    pub send_delay: Duration,
    /// Splash duration; `None` skips the preloader entirely.
    pub splash: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            fetch_delay: Duration::from_millis(120),
            send_delay: Duration::from_millis(1500),
            splash: Some(Duration::from_millis(1400)),
        }
    }
}

impl AppConfig {
    /// Create a default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target FPS (builder).
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Set the simulated bundle-fetch delay (builder).
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }

    /// Set the simulated delivery delay (builder).
    pub fn with_send_delay(mut self, delay: Duration) -> Self {
        self.send_delay = delay;
        self
    }

    /// Set the splash duration (builder).
    pub fn with_splash(mut self, duration: Duration) -> Self {
        self.splash = Some(duration);
        self
    }

    /// Skip the splash (builder).
    pub fn without_splash(mut self) -> Self {
        self.splash = None;
        self
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// The portfolio application.
pub struct App {
    config: AppConfig,
    router: Router,
    bus: EventBus,
    notifications: NotificationCenter,
    preloader: Option<Preloader>,
    view: Option<View>,
    title: StateCell<String>,
    pending_nav: Option<PendingNavigation>,
    sender: Arc<dyn MessageSender>,
    clock: Duration,
    viewport: Size,
    redraw: DirtyFlag,
    running: bool,
    preload_started: bool,
}

impl App {
    /// Build the app over the portfolio route table.
    pub fn new(config: AppConfig, viewport: Size) -> Result<Self, RouteError> {
        let table = portfolio_routes()?;
        let router = Router::new(table, RouteLoader::new(config.fetch_delay));
        let sender = Arc::new(SimulatedSender::new(config.send_delay));
        let preloader = config.splash.map(Preloader::new);

        let mut redraw = DirtyFlag::new();
        redraw.mark();

        Ok(Self {
            config,
            router,
            bus: EventBus::new(),
            notifications: NotificationCenter::new(),
            preloader,
            view: None,
            title: StateCell::new(String::new()),
            pending_nav: None,
            sender,
            clock: Duration::ZERO,
            viewport,
            redraw,
            running: true,
            preload_started: false,
        })
    }

    /// Replace the message transport (used to exercise the failure path).
    pub fn with_sender(mut self, sender: Arc<dyn MessageSender>) -> Self {
        self.sender = sender;
        self
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// Whether the app should keep running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The active page title (empty before the first activation).
    pub fn title(&self) -> &str {
        self.title.get()
    }

    /// The app clock, advanced by [`tick`](Self::tick).
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// The mounted view, if a navigation has completed.
    pub fn view(&self) -> Option<&View> {
        self.view.as_ref()
    }

    /// Mutable view access (the pilot drives the form through this).
    pub fn view_mut(&mut self) -> Option<&mut View> {
        self.view.as_mut()
    }

    /// Active notifications.
    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// The router (warm-cache inspection).
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Drain application events for external observers.
    pub fn drain_events(&mut self) -> Vec<Envelope> {
        self.bus.drain()
    }

    /// Consume the pending redraw request.
    pub fn take_redraw(&mut self) -> bool {
        self.redraw.take()
    }

    /// The app config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    // ── Navigation ───────────────────────────────────────────────────

    /// Start navigating to `path`.
    ///
    /// Resolution (including the redirect of unknown paths to `/`) happens
    /// now; the bundle load completes in a later [`tick`](Self::tick). Any
    /// navigation already in flight is abandoned.
    pub fn request_navigate(&mut self, path: &str) {
        match self.router.begin_navigation(path) {
            Ok(pending) => {
                debug!(requested = path, resolved = %pending.path, "navigation started");
                self.pending_nav = Some(pending);
                self.redraw.mark();
            }
            Err(error) => {
                warn!(path, %error, "navigation rejected");
                self.notifications.post(
                    "Could not open that page",
                    NotifyLevel::Error,
                    self.clock,
                );
            }
        }
    }

    fn poll_navigation(&mut self) {
        let Some(pending) = self.pending_nav.as_mut() else {
            return;
        };
        let Some(result) = pending.try_take() else {
            return;
        };
        let pending = self.pending_nav.take().expect("pending navigation present");

        if !self.router.is_current(pending.generation) {
            // A newer navigation superseded this load; never install it.
            debug!(path = %pending.path, "stale navigation discarded");
            return;
        }

        match result {
            Ok(page) => {
                if let Some(mut old) = self.view.take() {
                    old.teardown();
                }
                let mut view = View::attach(page.blueprint(), self.viewport);
                // Arm-then-check so above-the-fold sections animate in.
                view.update_entrances(self.clock);
                self.view = Some(view);
                self.title.set(pending.title);
                self.bus.push(Envelope::new(RouteActivated { path: pending.path.clone() }));
                self.redraw.mark();

                if !self.preload_started {
                    self.preload_started = true;
                    let handles =
                        PreloadStrategy.spawn(self.router.table(), self.router.loader());
                    debug!(count = handles.len(), "preload started");
                }
            }
            Err(error) => {
                warn!(path = %pending.path, %error, "route load failed");
                self.notifications.post(
                    "Could not load that page",
                    NotifyLevel::Error,
                    self.clock,
                );
            }
        }
    }

    // ── Tick ─────────────────────────────────────────────────────────

    /// Advance the app by `dt`: splash, pending navigation, form
    /// completion, entrance observers, notification expiry.
    pub fn tick(&mut self, dt: Duration) {
        self.clock += dt;

        if let Some(preloader) = self.preloader.as_mut() {
            preloader.tick(dt, &mut self.bus);
            if preloader.is_hidden() {
                self.preloader = None;
                self.redraw.mark();
            } else {
                // Splash progress is visible motion.
                self.redraw.mark();
            }
        }

        self.poll_navigation();

        if let Some(view) = self.view.as_mut() {
            if let Some(form) = view.form_mut() {
                match form.poll() {
                    Some(FormEvent::Submitted) => {
                        self.notifications.post(
                            "Message sent successfully! I'll get back to you soon.",
                            NotifyLevel::Info,
                            self.clock,
                        );
                        self.redraw.mark();
                    }
                    Some(FormEvent::Failed(error)) => {
                        warn!(%error, "contact form delivery failed");
                        self.notifications.post(
                            "Could not send your message. Please try again.",
                            NotifyLevel::Error,
                            self.clock,
                        );
                        self.redraw.mark();
                    }
                    None => {}
                }
            }

            view.update_entrances(self.clock);
            if !view.settled(self.clock) {
                self.redraw.mark();
            }
        }

        if self.notifications.tick(self.clock) > 0 {
            self.redraw.mark();
        }
    }

    // ── Input ────────────────────────────────────────────────────────

    /// Handle one normalized input event.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Resize { width, height } => {
                self.viewport = Size::new(width as i32, height as i32);
                if let Some(view) = self.view.as_mut() {
                    view.resize(self.viewport);
                }
                self.redraw.mark();
            }
            InputEvent::Scroll(delta) => self.scroll_by(delta),
            InputEvent::Key(key) => self.handle_key(key),
        }
    }

    fn handle_key(&mut self, key: Key) {
        let typing = self.view.as_ref().is_some_and(|v| v.form().is_some());
        match key {
            Key::Esc => self.quit(),
            Key::Char(ch) if typing => {
                if let Some(form) = self.view.as_mut().and_then(View::form_mut) {
                    form.insert_char(ch);
                    self.redraw.mark();
                }
            }
            Key::Char('q') => self.quit(),
            Key::Char('1') => self.request_navigate("/"),
            Key::Char('2') => self.request_navigate("/about"),
            Key::Char('3') => self.request_navigate("/projects"),
            Key::Char('4') => self.request_navigate("/skills"),
            Key::Char('5') => self.request_navigate("/contact"),
            Key::Char(_) => {}
            Key::Backspace if typing => {
                if let Some(form) = self.view.as_mut().and_then(View::form_mut) {
                    form.delete_char();
                    self.redraw.mark();
                }
            }
            Key::Backspace => {}
            Key::Tab if typing => {
                if let Some(form) = self.view.as_mut().and_then(View::form_mut) {
                    form.focus_next();
                    self.redraw.mark();
                }
            }
            Key::BackTab if typing => {
                if let Some(form) = self.view.as_mut().and_then(View::form_mut) {
                    form.focus_prev();
                    self.redraw.mark();
                }
            }
            Key::Tab | Key::BackTab => {}
            Key::Enter if typing => self.submit_form(),
            Key::Enter => {}
            Key::Up => self.scroll_by(-1),
            Key::Down => self.scroll_by(1),
            Key::PageUp => self.scroll_by(-(self.viewport.height - 2).max(1)),
            Key::PageDown => self.scroll_by((self.viewport.height - 2).max(1)),
            Key::Home => self.scroll_to(0),
            Key::End => self.scroll_to(i32::MAX),
        }
    }

    fn quit(&mut self) {
        self.running = false;
        self.bus.push(Envelope::new(Quit));
    }

    fn scroll_by(&mut self, delta: i32) {
        if let Some(view) = self.view.as_mut() {
            view.scroll_by(delta);
            view.update_entrances(self.clock);
            self.redraw.mark();
        }
    }

    fn scroll_to(&mut self, offset: i32) {
        if let Some(view) = self.view.as_mut() {
            view.scroll_to(offset);
            view.update_entrances(self.clock);
            self.redraw.mark();
        }
    }

    fn submit_form(&mut self) {
        let sender = Arc::clone(&self.sender);
        if let Some(form) = self.view.as_mut().and_then(View::form_mut) {
            let outcome = form.submit(sender.as_ref());
            match outcome {
                SubmitOutcome::Started | SubmitOutcome::Rejected => self.redraw.mark(),
                SubmitOutcome::InFlight => {}
            }
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Compose the current frame: the splash while the preloader runs,
    /// otherwise the mounted page.
    pub fn render(&self) -> Vec<Line> {
        if let Some(preloader) = self.preloader.as_ref() {
            return splash_frame(preloader, self.viewport);
        }
        match self.view.as_ref() {
            Some(view) => page_frame(
                view,
                &view.styles(self.clock),
                self.title.get(),
                self.notifications.active(),
                self.viewport,
            ),
            None => Vec::new(),
        }
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("title", &self.title.get())
            .field("running", &self.running)
            .field("clock", &self.clock)
            .field("view", &self.view.is_some())
            .field("pending_nav", &self.pending_nav.is_some())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
