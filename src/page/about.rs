//! The about page: short bio plus the stat cards row.

use super::{Blueprint, Page, Section};
use crate::anim::AnimationTrigger;
use std::time::Duration;

/// `/about`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AboutPage;

fn stat_card(value: &str, caption: &str) -> Section {
    Section::new()
        .with_class("stat-card")
        .with_attr("role", "figure")
        .with_attr("aria-label", format!("{value} {caption}"))
        .with_line(value.to_owned())
        .with_line(caption.to_owned())
}

impl Page for AboutPage {
    fn path(&self) -> &'static str {
        "/about"
    }

    fn title(&self) -> &'static str {
        "About | Uma Shankar"
    }

    fn blueprint(&self) -> Blueprint {
        let bio = Section::new()
            .with_class("about-bio")
            .with_heading("About me")
            .with_lines([
                "Software engineer focused on the front of the front end:",
                "interaction, motion, and interfaces that stay out of the way.",
                "Previously shipped dashboards, design systems, and a lot of",
                "forms that people actually finished filling in.",
            ]);

        let stats = vec![
            stat_card("3+", "years of experience"),
            stat_card("20+", "projects shipped"),
            stat_card("12", "technologies in rotation"),
        ];

        let mut sections = vec![bio];
        sections.extend(stats);

        Blueprint::new(sections)
            .with_trigger(AnimationTrigger::new("about-bio").with_threshold(0.9))
            .with_trigger(
                AnimationTrigger::new("stat-card")
                    .with_threshold(0.85)
                    .staggered(Duration::from_millis(120)),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_stat_cards_with_labels() {
        let blueprint = AboutPage.blueprint();
        let cards: Vec<_> = blueprint
            .sections
            .iter()
            .filter(|s| s.has_class("stat-card"))
            .collect();
        assert_eq!(cards.len(), 3);
        assert!(cards.iter().all(|c| c.attr("aria-label").is_some()));
    }

    #[test]
    fn stat_cards_stagger() {
        let blueprint = AboutPage.blueprint();
        let trigger = blueprint
            .triggers
            .iter()
            .find(|t| t.selector == "stat-card")
            .unwrap();
        assert_eq!(trigger.stagger, Some(Duration::from_millis(120)));
    }
}
