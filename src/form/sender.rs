//! Message transport for the contact form.
//!
//! The portfolio has no backend, so the production sender simulates delivery
//! with a fixed async delay and unconditional success. The trait seam exists
//! so the failure path (error notification, values preserved for retry) is
//! exercised the same way a real transport would drive it.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

// ---------------------------------------------------------------------------
// ContactMessage
// ---------------------------------------------------------------------------

/// The payload assembled from a valid contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Delivery failures.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SendError {
    /// The transport reported a failure.
    #[error("message delivery failed: {0}")]
    Delivery(String),
}

// ---------------------------------------------------------------------------
// MessageSender
// ---------------------------------------------------------------------------

/// Boxed send future, so the trait stays object-safe.
pub type SendFuture = Pin<Box<dyn Future<Output = Result<(), SendError>> + Send>>;

/// A contact message transport.
pub trait MessageSender: Send + Sync {
    /// Deliver the message asynchronously.
    fn send(&self, message: ContactMessage) -> SendFuture;
}

// ---------------------------------------------------------------------------
// SimulatedSender
// ---------------------------------------------------------------------------

/// The no-backend transport: waits a fixed delay, then succeeds.
#[derive(Debug, Clone)]
pub struct SimulatedSender {
    delay: Duration,
}

impl SimulatedSender {
    /// Create a sender that completes after `delay`.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedSender {
    /// The delay the site uses to make the submitting state visible.
    fn default() -> Self {
        Self::new(Duration::from_millis(1500))
    }
}

impl MessageSender for SimulatedSender {
    fn send(&self, _message: ContactMessage) -> SendFuture {
        let delay = self.delay;
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            Ok(())
        })
    }
}

// ---------------------------------------------------------------------------
// FailingSender
// ---------------------------------------------------------------------------

/// A transport that always fails after its delay. Drives the retry path.
#[derive(Debug, Clone)]
pub struct FailingSender {
    delay: Duration,
    reason: String,
}

impl FailingSender {
    /// Create a sender that fails with `reason` after `delay`.
    pub fn new(delay: Duration, reason: impl Into<String>) -> Self {
        Self { delay, reason: reason.into() }
    }
}

impl MessageSender for FailingSender {
    fn send(&self, _message: ContactMessage) -> SendFuture {
        let delay = self.delay;
        let reason = self.reason.clone();
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            Err(SendError::Delivery(reason))
        })
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    fn message() -> ContactMessage {
        ContactMessage {
            name: "Al".into(),
            email: "a@b.com".into(),
            message: "Hello there!".into(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_sender_succeeds_after_delay() {
        let sender = SimulatedSender::new(Duration::from_millis(1500));
        let began = Instant::now();
        sender.send(message()).await.unwrap();
        assert!(began.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn failing_sender_reports_reason() {
        let sender = FailingSender::new(Duration::from_millis(10), "relay down");
        let err = sender.send(message()).await.unwrap_err();
        assert_eq!(err, SendError::Delivery("relay down".into()));
    }

    #[test]
    fn default_delay_matches_site_feel() {
        let sender = SimulatedSender::default();
        assert_eq!(sender.delay, Duration::from_millis(1500));
    }
}
