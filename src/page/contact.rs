//! The contact page: reach-out info plus the validated message form.

use super::{Blueprint, Page, Section};
use crate::anim::AnimationTrigger;
use crate::form::{FieldSpec, Validator};

/// `/contact`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactPage;

/// The contact form schema: name (at least 2 chars), a well-formed email,
/// and a message of at least 10 chars.
pub fn contact_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("name", "Name", vec![Validator::Required, Validator::MinLength(2)]),
        FieldSpec::new("email", "Email", vec![Validator::Required, Validator::Email]),
        FieldSpec::new(
            "message",
            "Message",
            vec![Validator::Required, Validator::MinLength(10)],
        ),
    ]
}

impl Page for ContactPage {
    fn path(&self) -> &'static str {
        "/contact"
    }

    fn title(&self) -> &'static str {
        "Contact | Uma Shankar"
    }

    fn blueprint(&self) -> Blueprint {
        let intro = Section::new()
            .with_class("contact-intro")
            .with_heading("Get in touch")
            .with_lines([
                "Have a project in mind, or just want to say hello?",
                "Fill in the form below. Tab moves between fields,",
                "Enter sends the message.",
            ]);

        // The renderer projects the live form into these reserved rows.
        let form_panel = Section::new()
            .with_class("contact-form")
            .with_attr("role", "form")
            .with_attr("aria-label", "Contact form")
            .with_lines((0..10).map(|_| ""));

        Blueprint::new(vec![intro, form_panel])
            .with_trigger(AnimationTrigger::new("contact-intro").with_threshold(0.9))
            .with_trigger(AnimationTrigger::new("contact-form").with_threshold(0.9))
            .with_form(contact_fields())
    }
}
