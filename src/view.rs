//! The mounted view: sections in an arena, scroll position, armed entrances,
//! and the optional form.
//!
//! Exactly one view is mounted at a time; only its own controllers mutate
//! its state. Teardown releases every armed observer — dropping a view must
//! never leave visibility observers or running tweens behind.

use std::collections::HashMap;
use std::time::Duration;

use slotmap::{SecondaryMap, SlotMap};
use tracing::warn;

use crate::anim::{EntranceController, StyleProps};
use crate::form::FormController;
use crate::geometry::{Region, Size};
use crate::page::{Blueprint, Section, SectionId};

// ---------------------------------------------------------------------------
// ScrollState
// ---------------------------------------------------------------------------

/// Vertical scroll position over the view's content.
///
/// The offset is always clamped to `[0, max_scroll]` where
/// `max_scroll = content_height - viewport_height` (clamped to zero).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollState {
    offset: i32,
    content_height: i32,
    viewport: Size,
}

impl ScrollState {
    /// Create a scroll state at the top.
    pub fn new(content_height: i32, viewport: Size) -> Self {
        Self {
            offset: 0,
            content_height,
            viewport,
        }
    }

    /// Current offset in rows.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// The maximum offset: `max(0, content_height - viewport_height)`.
    pub fn max_scroll(&self) -> i32 {
        (self.content_height - self.viewport.height).max(0)
    }

    /// Scroll to an absolute offset, clamping to the valid range.
    pub fn scroll_to(&mut self, offset: i32) {
        self.offset = offset.clamp(0, self.max_scroll());
    }

    /// Scroll by a relative delta, clamping to the valid range.
    pub fn scroll_by(&mut self, delta: i32) {
        self.scroll_to(self.offset + delta);
    }

    /// Scroll progress as a fraction in `[0, 1]`. Zero when not scrollable.
    pub fn percent(&self) -> f32 {
        let max = self.max_scroll();
        if max <= 0 {
            0.0
        } else {
            self.offset as f32 / max as f32
        }
    }

    /// The visible window in content coordinates.
    pub fn viewport_region(&self) -> Region {
        Region::new(0, self.offset, self.viewport.width, self.viewport.height)
    }

    /// Update the viewport size and re-clamp the offset.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.scroll_to(self.offset);
    }
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

/// A page mounted into the viewport.
pub struct View {
    sections: SlotMap<SectionId, Section>,
    order: Vec<SectionId>,
    bounds: SecondaryMap<SectionId, Region>,
    entrances: EntranceController,
    form: Option<FormController>,
    scroll: ScrollState,
}

impl View {
    /// Mount a blueprint: insert sections, stack their bounds top to bottom,
    /// arm entrance triggers, and build the form if the page declares one.
    ///
    /// A trigger whose targets overlap an already-armed trigger is skipped
    /// with a warning; one bad trigger never blocks the rest of the view.
    pub fn attach(blueprint: Blueprint, viewport: Size) -> Self {
        let mut sections = SlotMap::with_key();
        let mut order = Vec::new();
        let mut bounds = SecondaryMap::new();

        let mut top = 0;
        for section in blueprint.sections {
            let height = section.height();
            let id = sections.insert(section);
            order.push(id);
            bounds.insert(id, Region::new(0, top, viewport.width, height));
            top += height;
        }

        let mut entrances = EntranceController::new();
        for trigger in blueprint.triggers {
            let targets: Vec<SectionId> = order
                .iter()
                .copied()
                .filter(|id| sections[*id].has_class(&trigger.selector))
                .collect();
            let selector = trigger.selector.clone();
            if let Err(error) = entrances.arm(trigger, targets) {
                warn!(%selector, %error, "skipping entrance trigger");
            }
        }

        Self {
            sections,
            order,
            bounds,
            entrances,
            form: blueprint.form.map(FormController::new),
            scroll: ScrollState::new(top, viewport),
        }
    }

    // ── Sections ─────────────────────────────────────────────────────

    /// Sections in document order.
    pub fn sections(&self) -> impl Iterator<Item = (SectionId, &Section)> {
        self.order.iter().map(move |id| (*id, &self.sections[*id]))
    }

    /// Look up one section.
    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.get(id)
    }

    /// Ids of sections carrying a class, in document order.
    pub fn find_by_class(&self, class: &str) -> Vec<SectionId> {
        self.order
            .iter()
            .copied()
            .filter(|id| self.sections[*id].has_class(class))
            .collect()
    }

    /// A section's content-space bounds.
    pub fn section_bounds(&self, id: SectionId) -> Option<Region> {
        self.bounds.get(id).copied()
    }

    /// Total content height in rows.
    pub fn content_height(&self) -> i32 {
        self.order
            .last()
            .and_then(|id| self.bounds.get(*id))
            .map(|r| r.bottom())
            .unwrap_or(0)
    }

    // ── Scrolling and entrances ──────────────────────────────────────

    /// Scroll position.
    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    /// Scroll by `delta` rows.
    pub fn scroll_by(&mut self, delta: i32) {
        self.scroll.scroll_by(delta);
    }

    /// Scroll to an absolute offset.
    pub fn scroll_to(&mut self, offset: i32) {
        self.scroll.scroll_to(offset);
    }

    /// Re-check entrance observers against the current viewport.
    pub fn update_entrances(&mut self, now: Duration) {
        self.entrances
            .on_scroll(self.scroll.viewport_region(), &self.bounds, now);
    }

    /// Sampled entrance styles at `now`.
    pub fn styles(&self, now: Duration) -> HashMap<SectionId, StyleProps> {
        self.entrances.styles(now)
    }

    /// Whether all spawned entrance tweens have finished.
    pub fn settled(&self, now: Duration) -> bool {
        self.entrances.settled(now)
    }

    /// The entrance controller (observer counts for diagnostics).
    pub fn entrances(&self) -> &EntranceController {
        &self.entrances
    }

    /// Adapt to a terminal resize.
    pub fn resize(&mut self, viewport: Size) {
        self.scroll.set_viewport(viewport);
        for (_, region) in self.bounds.iter_mut() {
            region.width = viewport.width;
        }
    }

    // ── Form ─────────────────────────────────────────────────────────

    /// The page's form, if it declares one.
    pub fn form(&self) -> Option<&FormController> {
        self.form.as_ref()
    }

    /// Mutable access to the form.
    pub fn form_mut(&mut self) -> Option<&mut FormController> {
        self.form.as_mut()
    }

    // ── Teardown ─────────────────────────────────────────────────────

    /// Release every armed observer and stop running tweens. Called when the
    /// view is replaced by a navigation.
    pub fn teardown(&mut self) {
        self.entrances.disarm_all();
    }
}

impl std::fmt::Debug for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View")
            .field("sections", &self.order.len())
            .field("armed", &self.entrances.armed_count())
            .field("form", &self.form.is_some())
            .field("scroll_offset", &self.scroll.offset())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
