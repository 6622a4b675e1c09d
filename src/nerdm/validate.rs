//! Form validation
//!
//! `validate` is a pure function over the form state and the field catalog.
//! On success it returns a [`ValidatedForm`] witness; the document builder
//! only accepts that witness, so a document can never be built from a form
//! that did not pass validation.

use crate::schema::{FieldKind, FieldSpec};
use crate::state::FormState;
use chrono::NaiveDate;

/// Date format accepted by date fields
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a field failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Required field left empty
    Required,
    /// Value does not parse as a calendar date
    InvalidDate,
    /// Value is not a member of the field's controlled vocabulary
    NotInVocabulary,
}

impl FailureReason {
    /// Short message shown next to the offending field
    pub fn message(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::InvalidDate => "not a valid date (YYYY-MM-DD)",
            Self::NotInVocabulary => "not in the controlled vocabulary",
        }
    }
}

/// A single validation failure, naming the field and the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFailure {
    pub field: String,
    pub reason: FailureReason,
}

impl FieldFailure {
    fn new(field: &str, reason: FailureReason) -> Self {
        Self {
            field: field.to_string(),
            reason,
        }
    }
}

/// Proof that a form state passed validation against a field catalog.
///
/// Instances can only be obtained from [`validate`]; holding one entitles
/// the caller to build a document from the wrapped form.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedForm<'a> {
    form: &'a FormState,
}

impl<'a> ValidatedForm<'a> {
    /// The validated form values
    pub fn form(&self) -> &'a FormState {
        self.form
    }
}

/// Check every field of `form` against the catalog.
///
/// Failures are reported in catalog declaration order, one per field.
/// Deterministic: the same form and catalog always yield the same verdict.
pub fn validate<'a>(
    form: &'a FormState,
    fields: &'a [FieldSpec],
) -> Result<ValidatedForm<'a>, Vec<FieldFailure>> {
    let mut failures = Vec::new();

    for spec in fields {
        if form.is_empty(&spec.name) {
            if spec.required {
                failures.push(FieldFailure::new(&spec.name, FailureReason::Required));
            }
            continue;
        }

        match spec.kind {
            FieldKind::Date => {
                let value = form.text(&spec.name);
                if NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).is_err() {
                    failures.push(FieldFailure::new(&spec.name, FailureReason::InvalidDate));
                }
            }
            FieldKind::Choice => {
                if let Some(allowed) = &spec.allowed_values {
                    let value = form.text(&spec.name);
                    if !allowed.iter().any(|v| v == value) {
                        failures
                            .push(FieldFailure::new(&spec.name, FailureReason::NotInVocabulary));
                    }
                }
            }
            FieldKind::Text | FieldKind::Multiline | FieldKind::MultiChoice => {}
        }
    }

    if failures.is_empty() {
        Ok(ValidatedForm { form })
    } else {
        Err(failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::resource_fields;
    use crate::state::FormState;
    use pretty_assertions::assert_eq;

    fn minimal_valid_form(fields: &[FieldSpec]) -> FormState {
        let mut form = FormState::new(fields);
        form.set_text("title", "Dataset A");
        form.set_text("description", "abc");
        form
    }

    #[test]
    fn test_missing_required_title_fails_naming_the_field() {
        let fields = resource_fields();
        let mut form = FormState::new(&fields);
        form.set_text("title", "");
        form.set_text("description", "abc");

        let failures = validate(&form, &fields).unwrap_err();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].field, "title");
        assert_eq!(failures[0].reason, FailureReason::Required);
    }

    #[test]
    fn test_all_missing_required_fields_are_reported() {
        let fields = resource_fields();
        let mut form = FormState::new(&fields);
        // accessLevel keeps its default, so only title and description fail
        let failures = validate(&form, &fields).unwrap_err();
        let named: Vec<&str> = failures.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(named, vec!["title", "description"]);

        form.set_text("accessLevel", "");
        let failures = validate(&form, &fields).unwrap_err();
        let named: Vec<&str> = failures.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(named, vec!["title", "description", "accessLevel"]);
    }

    #[test]
    fn test_satisfying_form_validates() {
        let fields = resource_fields();
        let form = minimal_valid_form(&fields);
        assert!(validate(&form, &fields).is_ok());
    }

    #[test]
    fn test_bad_date_fails() {
        let fields = resource_fields();
        let mut form = minimal_valid_form(&fields);
        form.set_text("issued", "2024-13-40");

        let failures = validate(&form, &fields).unwrap_err();
        assert_eq!(failures[0].field, "issued");
        assert_eq!(failures[0].reason, FailureReason::InvalidDate);
    }

    #[test]
    fn test_good_date_passes() {
        let fields = resource_fields();
        let mut form = minimal_valid_form(&fields);
        form.set_text("issued", "2024-03-09");
        assert!(validate(&form, &fields).is_ok());
    }

    #[test]
    fn test_empty_optional_date_passes() {
        let fields = resource_fields();
        let form = minimal_valid_form(&fields);
        assert_eq!(form.text("issued"), "");
        assert!(validate(&form, &fields).is_ok());
    }

    #[test]
    fn test_choice_outside_vocabulary_fails() {
        let fields = resource_fields();
        let mut form = minimal_valid_form(&fields);
        form.set_text("accessLevel", "secret");

        let failures = validate(&form, &fields).unwrap_err();
        assert_eq!(failures[0].field, "accessLevel");
        assert_eq!(failures[0].reason, FailureReason::NotInVocabulary);
    }

    #[test]
    fn test_unconstrained_choice_accepts_free_text() {
        // A degraded vocabulary fetch leaves theme unconstrained
        let fields = resource_fields();
        let mut form = minimal_valid_form(&fields);
        form.set_text("theme", "anything at all");
        assert!(validate(&form, &fields).is_ok());
    }

    #[test]
    fn test_constrained_theme_enforces_membership() {
        let mut fields = resource_fields();
        crate::schema::apply_vocabulary(&mut fields, "theme", &["Physics".to_string()]);

        let mut form = minimal_valid_form(&fields);
        form.set_text("theme", "Astrology");
        let failures = validate(&form, &fields).unwrap_err();
        assert_eq!(failures[0].field, "theme");

        form.set_text("theme", "Physics");
        assert!(validate(&form, &fields).is_ok());
    }

    #[test]
    fn test_verdict_is_deterministic() {
        let fields = resource_fields();
        let mut form = FormState::new(&fields);
        form.set_text("description", "abc");
        let a = validate(&form, &fields).unwrap_err();
        let b = validate(&form, &fields).unwrap_err();
        assert_eq!(a, b);
    }
}
