//! Pages and sections.
//!
//! A [`Page`] describes itself as a [`Blueprint`]: an ordered list of
//! [`Section`]s (each carrying class and attribute markers), the entrance
//! triggers to arm, and — for the contact page — the form schema. The view
//! mounts the blueprint; pages hold no live state of their own.

use slotmap::new_key_type;

use crate::anim::AnimationTrigger;
use crate::form::FieldSpec;

mod about;
mod contact;
mod home;
mod projects;
mod skills;

pub use about::AboutPage;
pub use contact::ContactPage;
pub use home::HomePage;
pub use projects::ProjectsPage;
pub use skills::SkillsPage;

use crate::route::{PageFactory, RouteEntry, RouteError, RouteTable, Priority};
use std::sync::Arc;

new_key_type! {
    /// Unique identifier for a mounted section. Copy, lightweight (u64).
    pub struct SectionId;
}

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

/// One content block of a page.
///
/// Classes select entrance-animation targets; attributes carry the
/// accessibility contract (`role`, `aria-label`, `aria-live`) that external
/// tooling relies on. Both are stable markers, not styling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    heading: Option<String>,
    lines: Vec<String>,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
}

impl Section {
    /// Create an empty section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heading (builder).
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    /// Append one body line (builder).
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// Append several body lines (builder).
    pub fn with_lines(mut self, lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    /// Add a class marker. No-op if already present (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Add an attribute marker (builder).
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// The heading, if any.
    pub fn heading(&self) -> Option<&str> {
        self.heading.as_deref()
    }

    /// Body lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Class markers.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Whether the section carries a class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Look up an attribute marker.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The rendered rows: heading, underline, body, one spacer row.
    pub fn rows(&self) -> Vec<String> {
        let mut rows = Vec::new();
        if let Some(heading) = &self.heading {
            rows.push(heading.clone());
            rows.push("─".repeat(heading.chars().count().min(40)));
        }
        rows.extend(self.lines.iter().cloned());
        rows.push(String::new());
        rows
    }

    /// Height in rows, matching [`rows`](Self::rows).
    pub fn height(&self) -> i32 {
        let heading_rows = if self.heading.is_some() { 2 } else { 0 };
        (heading_rows + self.lines.len() + 1) as i32
    }
}

// ---------------------------------------------------------------------------
// Blueprint / Page
// ---------------------------------------------------------------------------

/// Everything needed to mount a page.
#[derive(Debug, Clone, Default)]
pub struct Blueprint {
    pub sections: Vec<Section>,
    pub triggers: Vec<AnimationTrigger>,
    pub form: Option<Vec<FieldSpec>>,
}

impl Blueprint {
    /// A blueprint with sections only.
    pub fn new(sections: Vec<Section>) -> Self {
        Self {
            sections,
            triggers: Vec::new(),
            form: None,
        }
    }

    /// Add an entrance trigger (builder).
    pub fn with_trigger(mut self, trigger: AnimationTrigger) -> Self {
        self.triggers.push(trigger);
        self
    }

    /// Attach a form schema (builder).
    pub fn with_form(mut self, specs: Vec<FieldSpec>) -> Self {
        self.form = Some(specs);
        self
    }
}

/// A routed page.
pub trait Page: Send + std::fmt::Debug {
    /// The canonical route path.
    fn path(&self) -> &'static str;

    /// The title applied while the page is active.
    fn title(&self) -> &'static str;

    /// Describe the page's content, triggers, and form.
    fn blueprint(&self) -> Blueprint;
}

// ---------------------------------------------------------------------------
// Route wiring
// ---------------------------------------------------------------------------

fn factory<P: Page + Default + 'static>() -> PageFactory {
    Arc::new(|| Box::pin(async { Ok(Box::new(P::default()) as Box<dyn Page>) }))
}

/// The portfolio's route table: five pages plus the wildcard redirect.
///
/// Hub pages preload at high priority, the long-tail pages at low; the
/// current strategy fetches all of them uniformly either way.
pub fn portfolio_routes() -> Result<RouteTable, RouteError> {
    RouteTable::new(vec![
        RouteEntry::page("/", "Uma Shankar - Software Engineer", factory::<HomePage>()),
        RouteEntry::page("/about", "About | Uma Shankar", factory::<AboutPage>())
            .preload(true)
            .priority(Priority::High),
        RouteEntry::page("/projects", "Projects | Uma Shankar", factory::<ProjectsPage>())
            .preload(true)
            .priority(Priority::High),
        RouteEntry::page("/skills", "Skills | Uma Shankar", factory::<SkillsPage>())
            .preload(true)
            .priority(Priority::Low),
        RouteEntry::page("/contact", "Contact | Uma Shankar", factory::<ContactPage>())
            .preload(true)
            .priority(Priority::Low),
        RouteEntry::wildcard_redirect(),
    ])
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::RouteTarget;

    // ── Section ──────────────────────────────────────────────────────

    #[test]
    fn section_builders() {
        let section = Section::new()
            .with_heading("Skills")
            .with_line("Rust")
            .with_class("skill-card")
            .with_attr("role", "listitem");
        assert_eq!(section.heading(), Some("Skills"));
        assert!(section.has_class("skill-card"));
        assert_eq!(section.attr("role"), Some("listitem"));
        assert_eq!(section.attr("missing"), None);
    }

    #[test]
    fn duplicate_class_not_added() {
        let section = Section::new().with_class("card").with_class("card");
        assert_eq!(section.classes().len(), 1);
    }

    #[test]
    fn height_matches_rows() {
        let with_heading = Section::new().with_heading("About").with_line("a").with_line("b");
        assert_eq!(with_heading.height(), with_heading.rows().len() as i32);
        assert_eq!(with_heading.height(), 5);

        let bare = Section::new().with_line("only");
        assert_eq!(bare.height(), bare.rows().len() as i32);
        assert_eq!(bare.height(), 2);
    }

    // ── Route table ──────────────────────────────────────────────────

    #[test]
    fn portfolio_routes_are_valid() {
        let table = portfolio_routes().unwrap();
        assert_eq!(table.entries().len(), 6);
    }

    #[test]
    fn wildcard_is_terminal_entry() {
        let table = portfolio_routes().unwrap();
        let last = table.entries().last().unwrap();
        assert!(last.is_wildcard());
        assert!(matches!(last.target, RouteTarget::Redirect(_)));
    }

    #[test]
    fn root_title_matches_site() {
        let table = portfolio_routes().unwrap();
        let root = table.resolve("/").unwrap();
        assert_eq!(root.title, "Uma Shankar - Software Engineer");
    }

    #[test]
    fn every_page_declares_consistent_path() {
        let pages: Vec<(Box<dyn Page>, &str)> = vec![
            (Box::new(HomePage), "/"),
            (Box::new(AboutPage), "/about"),
            (Box::new(ProjectsPage), "/projects"),
            (Box::new(SkillsPage), "/skills"),
            (Box::new(ContactPage), "/contact"),
        ];
        for (page, path) in pages {
            assert_eq!(page.path(), path);
            assert!(!page.blueprint().sections.is_empty());
        }
    }
}
