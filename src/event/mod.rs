//! Events: application event bus and normalized user input.

pub mod handler;
pub mod input;
pub mod message;

pub use handler::EventBus;
pub use input::{InputEvent, Key};
pub use message::{AppEvent, Envelope, PreloaderHidden, Quit, RouteActivated};
