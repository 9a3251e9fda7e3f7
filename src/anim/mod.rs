//! Entrance animation engine: easing curves, property tweens, and the
//! scroll-triggered entrance controller.

pub mod easing;
pub mod entrance;
pub mod tween;

pub use easing::Easing;
pub use entrance::{AnimationTrigger, EntranceController, EntranceError};
pub use tween::{StyleProps, Tween, TweenPhase, TweenSpec};
