//! The landing page: hero banner, voice introduction button, call to action.

use super::{Blueprint, Page, Section};
use crate::anim::AnimationTrigger;
use std::time::Duration;

/// `/` — the first page a visitor sees.
#[derive(Debug, Clone, Copy, Default)]
pub struct HomePage;

impl Page for HomePage {
    fn path(&self) -> &'static str {
        "/"
    }

    fn title(&self) -> &'static str {
        "Uma Shankar - Software Engineer"
    }

    fn blueprint(&self) -> Blueprint {
        let hero = Section::new()
            .with_class("hero")
            .with_line("UMA SHANKAR")
            .with_line("Software Engineer")
            .with_line("")
            .with_line("I build fast, accessible web experiences")
            .with_line("with a love for motion and detail.");

        let voice = Section::new()
            .with_class("voice-button")
            .with_attr("role", "button")
            .with_attr("aria-label", "Play voice introduction")
            .with_line("[ > Hear my introduction ]");

        let cta = Section::new()
            .with_class("hero-cta")
            .with_line("Press 2-5 to explore About, Projects, Skills, Contact.");

        Blueprint::new(vec![hero, voice, cta])
            .with_trigger(AnimationTrigger::new("hero").with_threshold(0.95))
            .with_trigger(
                AnimationTrigger::new("voice-button")
                    .with_threshold(0.9)
                    .with_tween(crate::anim::TweenSpec::entrance().with_easing(crate::anim::Easing::EaseOutBack)),
            )
            .with_trigger(
                AnimationTrigger::new("hero-cta")
                    .with_threshold(0.9)
                    .staggered(Duration::from_millis(100)),
            )
    }
}
