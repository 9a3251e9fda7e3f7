//! The form submission state machine.
//!
//! `Idle -> Submitting -> (Success | Idle-with-errors)`. Submission starts
//! only when every field validates; an invalid attempt touches all fields so
//! their errors surface and the state stays `Idle`. While a send is in
//! flight, further submits are no-ops. Completion arrives on a oneshot
//! channel polled by the app tick: success clears the form, failure keeps
//! the values so the user can retry.

use tokio::sync::oneshot;
use tracing::warn;

use super::field::{Field, FieldSpec};
use super::sender::{ContactMessage, MessageSender, SendError};

// ---------------------------------------------------------------------------
// Status / outcomes / events
// ---------------------------------------------------------------------------

/// Externally visible submission status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
}

/// What a `submit()` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation passed; the send task is running.
    Started,
    /// Validation failed; all fields were touched, state stays idle.
    Rejected,
    /// A send is already in flight; the call was a no-op.
    InFlight,
}

/// Completion events, consumed by the app to post notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// The message was delivered; the form has been reset.
    Submitted,
    /// Delivery failed; values are preserved for retry.
    Failed(SendError),
}

// ---------------------------------------------------------------------------
// FormController
// ---------------------------------------------------------------------------

/// Reactive form state plus the submission gate.
pub struct FormController {
    fields: Vec<Field>,
    status: FormStatus,
    focus: usize,
    pending: Option<oneshot::Receiver<Result<(), SendError>>>,
}

impl FormController {
    /// Build a form from field specs. The first field starts focused.
    pub fn new(specs: Vec<FieldSpec>) -> Self {
        Self {
            fields: specs.into_iter().map(Field::new).collect(),
            status: FormStatus::Idle,
            focus: 0,
            pending: None,
        }
    }

    // ── Field access ─────────────────────────────────────────────────

    /// All fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Set a field's value by name (no-op for unknown names).
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.name() == name) {
            field.set_value(value);
        }
    }

    /// Whether every field passes validation.
    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(Field::is_valid)
    }

    // ── Focus and editing ────────────────────────────────────────────

    /// Index of the focused field.
    pub fn focused(&self) -> usize {
        self.focus
    }

    /// Move focus to the next field, touching the one being left.
    pub fn focus_next(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.fields[self.focus].touch();
        self.focus = (self.focus + 1) % self.fields.len();
    }

    /// Move focus to the previous field, touching the one being left.
    pub fn focus_prev(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.fields[self.focus].touch();
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    /// Type a character into the focused field.
    pub fn insert_char(&mut self, ch: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.insert_char(ch);
        }
    }

    /// Delete the last character of the focused field.
    pub fn delete_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.delete_char();
        }
    }

    // ── Submission ───────────────────────────────────────────────────

    /// Current status.
    pub fn status(&self) -> FormStatus {
        self.status
    }

    /// Whether a send is in flight.
    pub fn submission_in_flight(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    /// Attempt a submission.
    ///
    /// Gated by `submission_in_flight`: a second call while one is pending
    /// returns [`SubmitOutcome::InFlight`] and does nothing. On a validation
    /// failure every field is touched and the call returns
    /// [`SubmitOutcome::Rejected`]. Otherwise the send runs on a spawned
    /// task whose result is picked up by [`poll`](Self::poll).
    pub fn submit(&mut self, sender: &dyn MessageSender) -> SubmitOutcome {
        if self.submission_in_flight() {
            return SubmitOutcome::InFlight;
        }
        if !self.is_valid() {
            for field in &mut self.fields {
                field.touch();
            }
            return SubmitOutcome::Rejected;
        }

        self.status = FormStatus::Submitting;
        let (tx, rx) = oneshot::channel();
        let send = sender.send(self.payload());
        tokio::spawn(async move {
            let _ = tx.send(send.await);
        });
        self.pending = Some(rx);
        SubmitOutcome::Started
    }

    /// Poll for send completion. Returns at most one event per submission.
    ///
    /// Success resets every field and returns to `Idle`; failure returns to
    /// `Idle` with values intact.
    pub fn poll(&mut self) -> Option<FormEvent> {
        let rx = self.pending.as_mut()?;
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(oneshot::error::TryRecvError::Empty) => return None,
            Err(oneshot::error::TryRecvError::Closed) => {
                warn!("send task dropped without reporting");
                Err(SendError::Delivery("send task dropped".into()))
            }
        };
        self.pending = None;
        self.status = FormStatus::Idle;

        match result {
            Ok(()) => {
                for field in &mut self.fields {
                    field.reset();
                }
                self.focus = 0;
                Some(FormEvent::Submitted)
            }
            Err(error) => Some(FormEvent::Failed(error)),
        }
    }

    /// Assemble the outbound payload from the well-known contact fields.
    fn payload(&self) -> ContactMessage {
        let value = |name: &str| {
            self.field(name)
                .map(|f| f.value().to_owned())
                .unwrap_or_default()
        };
        ContactMessage {
            name: value("name"),
            email: value("email"),
            message: value("message"),
        }
    }
}

impl std::fmt::Debug for FormController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("status", &self.status)
            .field("focus", &self.focus)
            .field("fields", &self.fields.len())
            .field("pending", &self.pending.is_some())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
