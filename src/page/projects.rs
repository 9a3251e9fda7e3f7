//! The projects page: featured work as a staggered card list.

use super::{Blueprint, Page, Section};
use crate::anim::AnimationTrigger;
use std::time::Duration;

/// `/projects`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectsPage;

const PROJECTS: [(&str, &str, &str); 4] = [
    (
        "folio-tui",
        "This site, in your terminal",
        "Lazy routes, scroll-triggered entrances, reactive contact form.",
    ),
    (
        "pulse-board",
        "Realtime metrics dashboard",
        "Streaming charts with change detection tuned to stay under budget.",
    ),
    (
        "formkit-a11y",
        "Accessible form primitives",
        "Validation states announced to screen readers as you type.",
    ),
    (
        "commute-ml",
        "Transit delay predictor",
        "Side project: gradient boosting over city transit feeds.",
    ),
];

fn project_card(name: &str, tagline: &str, detail: &str) -> Section {
    Section::new()
        .with_class("project-card")
        .with_attr("aria-label", format!("Project: {name}"))
        .with_line(format!("{name}  -  {tagline}"))
        .with_line(format!("  {detail}"))
}

impl Page for ProjectsPage {
    fn path(&self) -> &'static str {
        "/projects"
    }

    fn title(&self) -> &'static str {
        "Projects | Uma Shankar"
    }

    fn blueprint(&self) -> Blueprint {
        let intro = Section::new()
            .with_class("projects-intro")
            .with_heading("Projects")
            .with_line("Selected work. Scroll for more.");

        let mut sections = vec![intro];
        sections.extend(
            PROJECTS
                .iter()
                .map(|(name, tagline, detail)| project_card(name, tagline, detail)),
        );

        Blueprint::new(sections)
            .with_trigger(AnimationTrigger::new("projects-intro").with_threshold(0.9))
            .with_trigger(
                AnimationTrigger::new("project-card")
                    .with_threshold(0.85)
                    .staggered(Duration::from_millis(110)),
            )
    }
}
