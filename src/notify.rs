//! Transient notifications.
//!
//! The submission flow surfaces outcomes as short-lived, dismissible
//! messages. Only the state lives here — a notification is a line of text
//! with a level and an expiry on the app clock; rendering is the frame's
//! concern.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Error,
}

/// One transient message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub level: NotifyLevel,
    posted_at: Duration,
    ttl: Duration,
}

impl Notification {
    /// Whether the notification has outlived its ttl at time `now`.
    pub fn is_expired(&self, now: Duration) -> bool {
        now >= self.posted_at + self.ttl
    }
}

// ---------------------------------------------------------------------------
// NotificationCenter
// ---------------------------------------------------------------------------

/// Holds active notifications and expires them on tick.
#[derive(Debug)]
pub struct NotificationCenter {
    active: Vec<Notification>,
    ttl: Duration,
}

impl NotificationCenter {
    /// Default time a notification stays on screen.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(4);

    /// Create a center with the default ttl.
    pub fn new() -> Self {
        Self::with_ttl(Self::DEFAULT_TTL)
    }

    /// Create a center with a custom ttl.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { active: Vec::new(), ttl }
    }

    /// Post a notification at time `now`.
    pub fn post(&mut self, text: impl Into<String>, level: NotifyLevel, now: Duration) {
        self.active.push(Notification {
            text: text.into(),
            level,
            posted_at: now,
            ttl: self.ttl,
        });
    }

    /// Drop every notification whose ttl elapsed. Returns how many expired.
    pub fn tick(&mut self, now: Duration) -> usize {
        let before = self.active.len();
        self.active.retain(|n| !n.is_expired(now));
        before - self.active.len()
    }

    /// Dismiss everything immediately.
    pub fn dismiss_all(&mut self) {
        self.active.clear();
    }

    /// Currently visible notifications, oldest first.
    pub fn active(&self) -> &[Notification] {
        &self.active
    }

    /// Number of visible notifications.
    pub fn count(&self) -> usize {
        self.active.len()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn post_and_read() {
        let mut center = NotificationCenter::new();
        center.post("Message sent successfully!", NotifyLevel::Info, ms(0));
        assert_eq!(center.count(), 1);
        assert_eq!(center.active()[0].text, "Message sent successfully!");
        assert_eq!(center.active()[0].level, NotifyLevel::Info);
    }

    #[test]
    fn expires_after_ttl() {
        let mut center = NotificationCenter::with_ttl(ms(1000));
        center.post("hello", NotifyLevel::Info, ms(0));

        assert_eq!(center.tick(ms(999)), 0);
        assert_eq!(center.count(), 1);
        assert_eq!(center.tick(ms(1000)), 1);
        assert_eq!(center.count(), 0);
    }

    #[test]
    fn expiry_is_per_notification() {
        let mut center = NotificationCenter::with_ttl(ms(1000));
        center.post("first", NotifyLevel::Info, ms(0));
        center.post("second", NotifyLevel::Error, ms(600));

        center.tick(ms(1100));
        assert_eq!(center.count(), 1);
        assert_eq!(center.active()[0].text, "second");
    }

    #[test]
    fn dismiss_all_clears() {
        let mut center = NotificationCenter::new();
        center.post("a", NotifyLevel::Info, ms(0));
        center.post("b", NotifyLevel::Error, ms(0));
        center.dismiss_all();
        assert_eq!(center.count(), 0);
    }
}
