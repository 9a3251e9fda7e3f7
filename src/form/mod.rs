//! Reactive contact form: fields and validators, the submission state
//! machine, and the (simulated) message transport.

pub mod controller;
pub mod field;
pub mod sender;

pub use controller::{FormController, FormEvent, FormStatus, SubmitOutcome};
pub use field::{Field, FieldSpec, Validator};
pub use sender::{ContactMessage, FailingSender, MessageSender, SendError, SimulatedSender};
