//! Reactive form fields: values, touched state, declarative validators.
//!
//! Validity is explicit state, recomputed from the value on demand; errors
//! are surfaced inline only once a field has been touched (focus left it, or
//! a submission was attempted). Validation never throws — an invalid field is
//! just a field whose `error()` is `Some`.

// ---------------------------------------------------------------------------
// Validator
// ---------------------------------------------------------------------------

/// A declarative validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    /// The trimmed value must be non-empty.
    Required,
    /// The value must have at least this many characters.
    MinLength(usize),
    /// The value must look like an email address.
    Email,
}

impl Validator {
    /// Check `value`, returning the violation message if any.
    pub fn check(&self, value: &str) -> Option<String> {
        match self {
            Validator::Required => {
                if value.trim().is_empty() {
                    Some("This field is required".into())
                } else {
                    None
                }
            }
            Validator::MinLength(min) => {
                if value.chars().count() < *min {
                    Some(format!("Must be at least {min} characters"))
                } else {
                    None
                }
            }
            Validator::Email => {
                if is_email(value) {
                    None
                } else {
                    Some("Enter a valid email address".into())
                }
            }
        }
    }
}

/// Minimal email shape check: non-empty local part, a domain with a dot that
/// is neither its first nor last character.
fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rfind('.') {
        Some(dot) => dot > 0 && dot + 1 < domain.len(),
        None => false,
    }
}

// ---------------------------------------------------------------------------
// FieldSpec / Field
// ---------------------------------------------------------------------------

/// Declarative description of one form field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Stable field name (form-state key).
    pub name: &'static str,
    /// Label shown next to the input.
    pub label: &'static str,
    /// Rules checked in order; the first violation is the field's error.
    pub validators: Vec<Validator>,
}

impl FieldSpec {
    /// Create a spec with the given rules.
    pub fn new(name: &'static str, label: &'static str, validators: Vec<Validator>) -> Self {
        Self { name, label, validators }
    }
}

/// One field's live state: current value and whether the user has touched it.
#[derive(Debug, Clone)]
pub struct Field {
    spec: FieldSpec,
    value: String,
    touched: bool,
}

impl Field {
    /// Create an empty, untouched field.
    pub fn new(spec: FieldSpec) -> Self {
        Self {
            spec,
            value: String::new(),
            touched: false,
        }
    }

    /// The field's stable name.
    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    /// The field's label.
    pub fn label(&self) -> &'static str {
        self.spec.label
    }

    /// The current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the user has interacted with this field.
    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Replace the value. Editing does not touch the field; leaving it does.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Append a typed character.
    pub fn insert_char(&mut self, ch: char) {
        self.value.push(ch);
    }

    /// Delete the last character, if any.
    pub fn delete_char(&mut self) {
        self.value.pop();
    }

    /// Mark the field as touched (focus left it, or submission attempted).
    pub fn touch(&mut self) {
        self.touched = true;
    }

    /// Clear the value and touched state (post-submission reset).
    pub fn reset(&mut self) {
        self.value.clear();
        self.touched = false;
    }

    /// The first failing validator's message, regardless of touched state.
    pub fn error(&self) -> Option<String> {
        self.spec
            .validators
            .iter()
            .find_map(|validator| validator.check(&self.value))
    }

    /// Whether every validator passes.
    pub fn is_valid(&self) -> bool {
        self.error().is_none()
    }

    /// The error to show inline: only once the field is touched.
    pub fn visible_error(&self) -> Option<String> {
        if self.touched {
            self.error()
        } else {
            None
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn email_field() -> Field {
        Field::new(FieldSpec::new(
            "email",
            "Email",
            vec![Validator::Required, Validator::Email],
        ))
    }

    // ── Validators ───────────────────────────────────────────────────

    #[test]
    fn required_rejects_blank() {
        assert!(Validator::Required.check("").is_some());
        assert!(Validator::Required.check("   ").is_some());
        assert!(Validator::Required.check("x").is_none());
    }

    #[test]
    fn min_length_counts_chars() {
        assert!(Validator::MinLength(2).check("A").is_some());
        assert!(Validator::MinLength(2).check("Al").is_none());
        assert!(Validator::MinLength(10).check("Hello there!").is_none());
    }

    #[test]
    fn email_accepts_plain_address() {
        assert!(Validator::Email.check("a@b.com").is_none());
        assert!(Validator::Email.check("uma.shankar@example.co.in").is_none());
    }

    #[test]
    fn email_rejects_malformed() {
        for bad in ["not-an-email", "@b.com", "a@", "a@b", "a@.com", "a@b.", "a@b@c.com"] {
            assert!(Validator::Email.check(bad).is_some(), "{bad} should fail");
        }
    }

    // ── Field state ──────────────────────────────────────────────────

    #[test]
    fn new_field_is_empty_and_untouched() {
        let field = email_field();
        assert_eq!(field.value(), "");
        assert!(!field.is_touched());
        assert!(!field.is_valid());
    }

    #[test]
    fn editing_does_not_touch() {
        let mut field = email_field();
        field.insert_char('a');
        assert!(!field.is_touched());
        assert!(field.visible_error().is_none());
    }

    #[test]
    fn touched_surfaces_error() {
        let mut field = email_field();
        field.set_value("not-an-email");
        field.touch();
        assert!(field.visible_error().is_some());
    }

    #[test]
    fn first_failing_validator_wins() {
        let mut field = email_field();
        field.touch();
        // Empty: Required fires before Email.
        assert_eq!(field.visible_error().unwrap(), "This field is required");
    }

    #[test]
    fn typing_and_deleting() {
        let mut field = email_field();
        field.insert_char('a');
        field.insert_char('b');
        field.delete_char();
        assert_eq!(field.value(), "a");
    }

    #[test]
    fn reset_clears_value_and_touched() {
        let mut field = email_field();
        field.set_value("a@b.com");
        field.touch();
        field.reset();
        assert_eq!(field.value(), "");
        assert!(!field.is_touched());
    }

    #[test]
    fn valid_value_has_no_error() {
        let mut field = email_field();
        field.set_value("a@b.com");
        field.touch();
        assert!(field.is_valid());
        assert!(field.visible_error().is_none());
    }
}
