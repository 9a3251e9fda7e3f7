//! Scroll-triggered entrance animations.
//!
//! The [`EntranceController`] registers one-shot visibility observers
//! ([`AnimationTrigger`]s) over mounted sections. When a target's top row
//! crosses the trigger's viewport-relative threshold, the controller spawns
//! eased tweens — staggered across grouped elements — and, for `fires_once`
//! triggers, self-disarms the observer. `disarm_all` is the mandatory
//! resource-release call on view teardown.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use slotmap::SecondaryMap;
use tracing::warn;

use super::tween::{StyleProps, Tween, TweenSpec};
use crate::geometry::Region;
use crate::page::SectionId;

// ---------------------------------------------------------------------------
// AnimationTrigger
// ---------------------------------------------------------------------------

/// A declarative entrance: which sections (by class), when (threshold as a
/// fraction of viewport height), and how (tween + optional stagger).
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationTrigger {
    /// Class name matched against section class lists, in document order.
    pub selector: String,
    /// Activation line as a fraction of viewport height: 0.8 means "fire when
    /// the target's top reaches 80% down the viewport".
    pub threshold: f32,
    /// The transition to run on activation.
    pub tween: TweenSpec,
    /// Per-element delay across a group; element *i* starts at `i * stagger`.
    pub stagger: Option<Duration>,
    /// Whether the observer self-disarms after the first activation.
    pub fires_once: bool,
}

impl AnimationTrigger {
    /// Create an entrance trigger for sections with `selector`, with the
    /// standard tween, an 85% threshold, firing once.
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            threshold: 0.85,
            tween: TweenSpec::entrance(),
            stagger: None,
            fires_once: true,
        }
    }

    /// Set the activation threshold (builder).
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the tween spec (builder).
    pub fn with_tween(mut self, tween: TweenSpec) -> Self {
        self.tween = tween;
        self
    }

    /// Stagger grouped elements by the given interval (builder).
    pub fn staggered(mut self, interval: Duration) -> Self {
        self.stagger = Some(interval);
        self
    }

    /// Set whether the trigger fires once per view lifetime (builder).
    pub fn fires_once(mut self, once: bool) -> Self {
        self.fires_once = once;
        self
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Arming failures.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EntranceError {
    /// A target section already has an armed trigger.
    #[error("a trigger is already armed for a target of selector `{selector}`")]
    AlreadyArmed { selector: String },
}

// ---------------------------------------------------------------------------
// EntranceController
// ---------------------------------------------------------------------------

/// Observer lifecycle. Re-fireable observers return to `Watching` once their
/// lead element has fully left the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObserverState {
    Watching,
    Fired,
}

#[derive(Debug)]
struct ArmedTrigger {
    trigger: AnimationTrigger,
    /// Target sections in document order. The first present target is the
    /// group lead; its top row decides activation.
    targets: Vec<SectionId>,
    state: ObserverState,
}

/// Drives scroll-triggered entrances for one mounted view.
///
/// Observers are checked in arm order on every scroll, so triggers fire in
/// the order their thresholds are crossed. Live tweens are sampled by
/// [`styles`](Self::styles) until the controller is disarmed.
#[derive(Debug, Default)]
pub struct EntranceController {
    armed: Vec<ArmedTrigger>,
    /// Invariant: at most one armed trigger per target section.
    armed_targets: HashSet<SectionId>,
    tweens: Vec<(SectionId, Tween)>,
}

impl EntranceController {
    /// Create a controller with no observers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a visibility observer for `trigger` over `targets`.
    ///
    /// Arming with no targets is not an error — the trigger is skipped with a
    /// warning so the rest of the view keeps animating.
    pub fn arm(
        &mut self,
        trigger: AnimationTrigger,
        targets: Vec<SectionId>,
    ) -> Result<(), EntranceError> {
        if targets.is_empty() {
            warn!(selector = %trigger.selector, "entrance trigger has no targets; skipping");
            return Ok(());
        }
        if targets.iter().any(|id| self.armed_targets.contains(id)) {
            return Err(EntranceError::AlreadyArmed { selector: trigger.selector });
        }
        self.armed_targets.extend(targets.iter().copied());
        self.armed.push(ArmedTrigger {
            trigger,
            targets,
            state: ObserverState::Watching,
        });
        Ok(())
    }

    /// Check every observer against the current viewport.
    ///
    /// `viewport` is in content coordinates (`y` = scroll offset); `bounds`
    /// maps mounted sections to their content-space regions. `now` is the app
    /// clock, used as the activation instant for spawned tweens.
    pub fn on_scroll(
        &mut self,
        viewport: Region,
        bounds: &SecondaryMap<SectionId, Region>,
        now: Duration,
    ) {
        let mut fired: Vec<(SectionId, Tween)> = Vec::new();
        let mut disarmed: Vec<usize> = Vec::new();

        for (index, armed) in self.armed.iter_mut().enumerate() {
            let lead = armed
                .targets
                .iter()
                .find_map(|id| bounds.get(*id).copied());
            let Some(lead_bounds) = lead else {
                warn!(
                    selector = %armed.trigger.selector,
                    "all entrance targets missing; dropping trigger"
                );
                disarmed.push(index);
                continue;
            };

            match armed.state {
                ObserverState::Watching => {
                    let activation_row = viewport.threshold_row(armed.trigger.threshold);
                    if lead_bounds.y <= activation_row {
                        let stagger = armed.trigger.stagger.unwrap_or(Duration::ZERO);
                        let mut slot = 0u32;
                        for id in &armed.targets {
                            if bounds.contains_key(*id) {
                                let start = now + stagger * slot;
                                fired.push((*id, Tween::new(armed.trigger.tween, start)));
                                slot += 1;
                            } else {
                                warn!(
                                    selector = %armed.trigger.selector,
                                    "entrance target missing; skipping element"
                                );
                            }
                        }
                        if armed.trigger.fires_once {
                            disarmed.push(index);
                        } else {
                            armed.state = ObserverState::Fired;
                        }
                    }
                }
                ObserverState::Fired => {
                    // Re-arm only after the lead element has fully left the
                    // viewport, so hovering around the threshold row cannot
                    // re-fire continuously.
                    if !viewport.intersects(lead_bounds) {
                        armed.state = ObserverState::Watching;
                    }
                }
            }
        }

        for index in disarmed.into_iter().rev() {
            let removed = self.armed.remove(index);
            for id in removed.targets {
                self.armed_targets.remove(&id);
            }
        }
        self.tweens.extend(fired);
    }

    /// Sample the current style of every animated section at time `now`.
    ///
    /// Sections without a tween are absent from the map; the renderer treats
    /// them as fully visible.
    pub fn styles(&self, now: Duration) -> HashMap<SectionId, StyleProps> {
        self.tweens
            .iter()
            .map(|(id, tween)| (*id, tween.sample(now)))
            .collect()
    }

    /// Whether every spawned tween has reached its final state.
    pub fn settled(&self, now: Duration) -> bool {
        self.tweens.iter().all(|(_, tween)| tween.is_complete(now))
    }

    /// Number of observers still armed.
    pub fn armed_count(&self) -> usize {
        self.armed.len()
    }

    /// Whether the given section currently has an armed observer.
    pub fn is_armed(&self, id: SectionId) -> bool {
        self.armed_targets.contains(&id)
    }

    /// Number of tweens spawned and still held (running or settled).
    pub fn tween_count(&self) -> usize {
        self.tweens.len()
    }

    /// Release every observer and stop all running tweens.
    ///
    /// Must be called on view teardown; a dropped view must not leave
    /// dangling observers behind.
    pub fn disarm_all(&mut self) {
        self.armed.clear();
        self.armed_targets.clear();
        self.tweens.clear();
    }
}

// ===========================================================================
// Tests
// ===========================================================================
