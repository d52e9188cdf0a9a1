//! Credential form state and validation.
//!
//! Pure state holder: field values, per-field violation sets, and the
//! display gating that keeps errors hidden until the user has interacted
//! with a field or tried to submit. No I/O happens here.

use crate::identity::Credentials;

/// The two fields of the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Username,
    Password,
}

/// A single local validation failure on one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    MissingRequired,
    TooShort,
}

impl Violation {
    /// Fixed display message for this violation.
    pub fn message(self) -> &'static str {
        match self {
            Violation::MissingRequired => "This field is required.",
            Violation::TooShort => "Value is too short.",
        }
    }
}

/// Declarative constraints for one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRules {
    pub required: bool,
    pub min_length: usize,
}

impl FieldRules {
    /// Computes the violation set for a candidate value.
    ///
    /// An empty required value is both missing and shorter than any
    /// positive minimum length.
    pub fn check(&self, value: &str) -> Vec<Violation> {
        let mut violations = Vec::new();
        if self.required && value.is_empty() {
            violations.push(Violation::MissingRequired);
        }
        if value.chars().count() < self.min_length {
            violations.push(Violation::TooShort);
        }
        violations
    }
}

/// Rule set for the whole form. Data, not code: swap it to change policy.
#[derive(Debug, Clone, Copy)]
pub struct FormRules {
    pub username: FieldRules,
    pub password: FieldRules,
}

impl Default for FormRules {
    fn default() -> Self {
        let rule = FieldRules {
            required: true,
            min_length: 6,
        };
        Self {
            username: rule,
            password: rule,
        }
    }
}

/// Per-field state: current value, interaction flag, computed violations.
#[derive(Debug, Clone, Default)]
struct FieldState {
    value: String,
    touched: bool,
    violations: Vec<Violation>,
}

/// The login form: two fields plus the submitted-once display gate.
#[derive(Debug, Clone)]
pub struct CredentialForm {
    rules: FormRules,
    username: FieldState,
    password: FieldState,
    submitted_once: bool,
}

impl CredentialForm {
    pub fn new(rules: FormRules) -> Self {
        let mut form = Self {
            rules,
            username: FieldState::default(),
            password: FieldState::default(),
            submitted_once: false,
        };
        form.username.violations = rules.username.check("");
        form.password.violations = rules.password.check("");
        form
    }

    fn rules_for(&self, field: Field) -> FieldRules {
        match field {
            Field::Username => self.rules.username,
            Field::Password => self.rules.password,
        }
    }

    fn field(&self, field: Field) -> &FieldState {
        match field {
            Field::Username => &self.username,
            Field::Password => &self.password,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut FieldState {
        match field {
            Field::Username => &mut self.username,
            Field::Password => &mut self.password,
        }
    }

    /// Replaces a field's value and recomputes its violation set.
    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        let rules = self.rules_for(field);
        let state = self.field_mut(field);
        state.value = value.into();
        state.violations = rules.check(&state.value);
    }

    /// Marks a field as individually interacted with.
    pub fn touch(&mut self, field: Field) {
        self.field_mut(field).touched = true;
    }

    pub fn value(&self, field: Field) -> &str {
        &self.field(field).value
    }

    /// The true violation set, regardless of display gating.
    pub fn violations(&self, field: Field) -> &[Violation] {
        &self.field(field).violations
    }

    /// Violations the view may surface: suppressed until the field was
    /// touched or the form was submitted at least once.
    pub fn visible_violations(&self, field: Field) -> &[Violation] {
        let state = self.field(field);
        if state.touched || self.submitted_once {
            &state.violations
        } else {
            &[]
        }
    }

    /// True iff every field's violation set is empty.
    pub fn is_valid(&self) -> bool {
        self.username.violations.is_empty() && self.password.violations.is_empty()
    }

    pub fn submitted_once(&self) -> bool {
        self.submitted_once
    }

    /// Lowers the display gate. Happens on every submission attempt.
    pub(crate) fn mark_submitted(&mut self) {
        self.submitted_once = true;
    }

    /// Snapshot for the transport layer. Later edits do not affect it.
    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.value.clone(),
            password: self.password.value.clone(),
        }
    }

    /// Erases the secret once it has served its single transmission.
    pub(crate) fn clear_password(&mut self) {
        self.password.value.clear();
        self.password.violations = self.rules.password.check("");
    }
}

impl Default for CredentialForm {
    fn default() -> Self {
        Self::new(FormRules::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: values shorter than the minimum report `TooShort`.
    #[test]
    fn test_short_value_violates_min_length() {
        let rule = FieldRules {
            required: true,
            min_length: 6,
        };

        assert_eq!(rule.check("bob"), vec![Violation::TooShort]);
        assert_eq!(rule.check("12345"), vec![Violation::TooShort]);
        assert!(rule.check("123456").is_empty());
        assert!(rule.check("alice1-and-longer").is_empty());
    }

    /// Test: the empty value is both missing and too short.
    #[test]
    fn test_empty_value_violates_required_and_min_length() {
        let rule = FieldRules {
            required: true,
            min_length: 6,
        };

        assert_eq!(
            rule.check(""),
            vec![Violation::MissingRequired, Violation::TooShort]
        );
    }

    /// Test: a fresh form is invalid and shows no errors anywhere.
    #[test]
    fn test_fresh_form_hides_violations() {
        let form = CredentialForm::default();

        assert!(!form.is_valid());
        assert!(!form.violations(Field::Username).is_empty());
        assert!(form.visible_violations(Field::Username).is_empty());
        assert!(form.visible_violations(Field::Password).is_empty());
    }

    /// Test: touching a field surfaces only that field's violations.
    #[test]
    fn test_touch_surfaces_single_field() {
        let mut form = CredentialForm::default();
        form.set_value(Field::Username, "bob");
        form.touch(Field::Username);

        assert_eq!(
            form.visible_violations(Field::Username),
            &[Violation::TooShort]
        );
        assert!(form.visible_violations(Field::Password).is_empty());
    }

    /// Test: the submitted-once gate surfaces every field at once.
    #[test]
    fn test_mark_submitted_surfaces_all_fields() {
        let mut form = CredentialForm::default();
        form.mark_submitted();

        assert!(form.submitted_once());
        assert!(!form.visible_violations(Field::Username).is_empty());
        assert!(!form.visible_violations(Field::Password).is_empty());
    }

    /// Test: a form with two conforming values is valid.
    #[test]
    fn test_valid_form() {
        let mut form = CredentialForm::default();
        form.set_value(Field::Username, "alice1");
        form.set_value(Field::Password, "pw12345");

        assert!(form.is_valid());
        assert!(form.violations(Field::Username).is_empty());
        assert!(form.violations(Field::Password).is_empty());
    }

    /// Test: the credentials snapshot is detached from later edits.
    #[test]
    fn test_credentials_snapshot_is_detached() {
        let mut form = CredentialForm::default();
        form.set_value(Field::Username, "alice1");
        form.set_value(Field::Password, "pw12345");

        let snapshot = form.credentials();
        form.set_value(Field::Password, "changed-later");

        assert_eq!(snapshot.password, "pw12345");
    }

    /// Test: clearing the password erases the value and restores the
    /// empty-value violations.
    #[test]
    fn test_clear_password() {
        let mut form = CredentialForm::default();
        form.set_value(Field::Password, "pw12345");
        form.clear_password();

        assert_eq!(form.value(Field::Password), "");
        assert_eq!(
            form.violations(Field::Password),
            &[Violation::MissingRequired, Violation::TooShort]
        );
    }

    /// Test: a relaxed rule set is honored (rules are data).
    #[test]
    fn test_custom_rules() {
        let rules = FormRules {
            username: FieldRules {
                required: true,
                min_length: 3,
            },
            password: FieldRules {
                required: true,
                min_length: 8,
            },
        };
        let mut form = CredentialForm::new(rules);
        form.set_value(Field::Username, "bob");
        form.set_value(Field::Password, "pw12345");

        assert!(form.violations(Field::Username).is_empty());
        assert_eq!(
            form.violations(Field::Password),
            &[Violation::TooShort]
        );
    }
}
