//! The skills page: one card per technology, entering in a staggered wave.

use super::{Blueprint, Page, Section};
use crate::anim::AnimationTrigger;
use std::time::Duration;

/// `/skills`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkillsPage;

const SKILLS: [(&str, &str); 6] = [
    ("Angular", "component architecture, reactive forms, router"),
    ("TypeScript", "strict mode, generics, tooling"),
    ("JavaScript", "the platform underneath it all"),
    ("Node.js", "APIs, build pipelines"),
    ("HTML & CSS", "semantics, layout, motion"),
    ("Accessibility", "ARIA, keyboard flows, screen readers"),
];

fn skill_card(name: &str, detail: &str) -> Section {
    Section::new()
        .with_class("skill-card")
        .with_attr("role", "listitem")
        .with_attr("aria-label", format!("Skill: {name}"))
        .with_line(name.to_owned())
        .with_line(format!("  {detail}"))
}

impl Page for SkillsPage {
    fn path(&self) -> &'static str {
        "/skills"
    }

    fn title(&self) -> &'static str {
        "Skills | Uma Shankar"
    }

    fn blueprint(&self) -> Blueprint {
        let intro = Section::new()
            .with_class("skills-intro")
            .with_heading("Skills")
            .with_line("Tools I reach for, most-used first.");

        let mut sections = vec![intro];
        sections.extend(SKILLS.iter().map(|(name, detail)| skill_card(name, detail)));

        Blueprint::new(sections)
            .with_trigger(AnimationTrigger::new("skills-intro").with_threshold(0.9))
            .with_trigger(
                AnimationTrigger::new("skill-card")
                    .with_threshold(0.85)
                    .staggered(Duration::from_millis(90)),
            )
    }
}
