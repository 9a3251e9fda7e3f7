//! Property tweens: from-state, to-state, duration, easing, sampled on a
//! per-frame clock.
//!
//! A [`Tween`] is a small state machine (`Pending -> Running -> Complete`)
//! over a [`TweenSpec`]. Time is an app-relative [`Duration`], advanced by the
//! frame loop, so sampling is deterministic and testable without a wall clock.

use std::time::Duration;

use super::easing::Easing;

// ---------------------------------------------------------------------------
// StyleProps
// ---------------------------------------------------------------------------

/// The animated property set: opacity, vertical offset, scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleProps {
    /// 0.0 = fully transparent, 1.0 = fully opaque.
    pub opacity: f32,
    /// Vertical displacement in rows; positive pushes the section down.
    pub offset_y: f32,
    /// Uniform scale; 1.0 is natural size.
    pub scale: f32,
}

impl StyleProps {
    /// Fully visible, in place.
    pub const VISIBLE: StyleProps = StyleProps { opacity: 1.0, offset_y: 0.0, scale: 1.0 };

    /// Transparent, shifted down, slightly shrunk: the standard entrance
    /// starting point.
    pub const ENTRANCE_START: StyleProps = StyleProps { opacity: 0.0, offset_y: 3.0, scale: 0.96 };

    /// Linear interpolation between `self` and `to` by `factor`.
    pub fn lerp(self, to: StyleProps, factor: f32) -> StyleProps {
        let mix = |a: f32, b: f32| a + (b - a) * factor;
        StyleProps {
            opacity: mix(self.opacity, to.opacity),
            offset_y: mix(self.offset_y, to.offset_y),
            scale: mix(self.scale, to.scale),
        }
    }
}

impl Default for StyleProps {
    fn default() -> Self {
        Self::VISIBLE
    }
}

// ---------------------------------------------------------------------------
// TweenSpec
// ---------------------------------------------------------------------------

/// A declarative transition: where to start, where to end, how long, and the
/// easing curve between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSpec {
    pub from: StyleProps,
    pub to: StyleProps,
    pub duration: Duration,
    pub easing: Easing,
}

impl TweenSpec {
    /// The standard entrance transition: fade in, slide up, settle to
    /// natural size over 600ms with cubic ease-out.
    pub fn entrance() -> Self {
        Self {
            from: StyleProps::ENTRANCE_START,
            to: StyleProps::VISIBLE,
            duration: Duration::from_millis(600),
            easing: Easing::EaseOutCubic,
        }
    }

    /// Override the duration (builder).
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Override the easing curve (builder).
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

// ---------------------------------------------------------------------------
// Tween
// ---------------------------------------------------------------------------

/// Where a tween is along its timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenPhase {
    /// The start time (stagger delay) has not been reached yet.
    Pending,
    /// Between start and start + duration.
    Running,
    /// Past the end; sampling returns the final style.
    Complete,
}

/// A [`TweenSpec`] bound to a start time on the app clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    spec: TweenSpec,
    start: Duration,
}

impl Tween {
    /// Schedule `spec` to begin at `start` on the app clock.
    pub fn new(spec: TweenSpec, start: Duration) -> Self {
        Self { spec, start }
    }

    /// The scheduled start time.
    pub fn start(&self) -> Duration {
        self.start
    }

    /// The phase at time `now`.
    pub fn phase(&self, now: Duration) -> TweenPhase {
        if now < self.start {
            TweenPhase::Pending
        } else if now >= self.start + self.spec.duration {
            TweenPhase::Complete
        } else {
            TweenPhase::Running
        }
    }

    /// Sample the animated properties at time `now`.
    ///
    /// Pending tweens hold the `from` style (the element sits in its initial
    /// state until its stagger delay elapses); complete tweens hold `to`.
    pub fn sample(&self, now: Duration) -> StyleProps {
        match self.phase(now) {
            TweenPhase::Pending => self.spec.from,
            TweenPhase::Complete => self.spec.to,
            TweenPhase::Running => {
                let elapsed = (now - self.start).as_secs_f32();
                let t = elapsed / self.spec.duration.as_secs_f32();
                self.spec.from.lerp(self.spec.to, self.spec.easing.eval(t))
            }
        }
    }

    /// Whether the tween has reached its final state.
    pub fn is_complete(&self, now: Duration) -> bool {
        self.phase(now) == TweenPhase::Complete
    }
}

// ===========================================================================
// Tests
// ===========================================================================
