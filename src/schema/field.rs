//! Form field definitions
//!
//! The field catalog is a static declaration of the form: one entry per
//! NERDm resource property the tool edits. It is defined once at startup
//! and never mutated afterwards, except that a successfully fetched
//! controlled vocabulary is patched into the `theme` field's allowed values.

/// Input kind of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line free text
    Text,
    /// Multi-line free text
    Multiline,
    /// Calendar date entered as YYYY-MM-DD
    Date,
    /// One value out of a controlled vocabulary
    Choice,
    /// Ordered list of short text entries
    MultiChoice,
}

/// Static description of one form field: name, kind and constraints
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Property name in the exported document
    pub name: String,
    /// Label shown next to the input widget
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    /// Allowed values for `Choice` fields; `None` means free text is accepted
    pub allowed_values: Option<Vec<String>>,
    /// Initial value placed in the form before the user edits
    pub default_value: Option<String>,
}

impl FieldSpec {
    /// Create a single-line text field
    pub fn text(name: &str, label: &str, required: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: FieldKind::Text,
            required,
            allowed_values: None,
            default_value: None,
        }
    }

    /// Create a multi-line text field
    pub fn multiline(name: &str, label: &str, required: bool) -> Self {
        Self {
            kind: FieldKind::Multiline,
            ..Self::text(name, label, required)
        }
    }

    /// Create a date field (YYYY-MM-DD)
    pub fn date(name: &str, label: &str, required: bool) -> Self {
        Self {
            kind: FieldKind::Date,
            ..Self::text(name, label, required)
        }
    }

    /// Create a choice field with a fixed vocabulary
    pub fn choice(name: &str, label: &str, required: bool, allowed: &[&str]) -> Self {
        Self {
            kind: FieldKind::Choice,
            allowed_values: Some(allowed.iter().map(|s| s.to_string()).collect()),
            ..Self::text(name, label, required)
        }
    }

    /// Create a choice field whose vocabulary is filled in later (or never,
    /// in which case it behaves as free text)
    pub fn open_choice(name: &str, label: &str, required: bool) -> Self {
        Self {
            kind: FieldKind::Choice,
            ..Self::text(name, label, required)
        }
    }

    /// Create a list-valued field
    pub fn multi(name: &str, label: &str, required: bool) -> Self {
        Self {
            kind: FieldKind::MultiChoice,
            ..Self::text(name, label, required)
        }
    }

    /// Set the initial value
    pub fn with_default(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }
}

/// Access levels defined by the schema
pub const ACCESS_LEVELS: &[&str] = &["public", "restricted public", "non-public"];

/// Canonical URL of the default license (CC-BY 4.0)
pub const DEFAULT_LICENSE: &str = "https://creativecommons.org/licenses/by/4.0/legalcode";

/// The field catalog for a public data resource record.
///
/// Declaration order here is the property order of the exported document.
/// `contact_name` and `contact_email` are the two halves of the schema's
/// nested `contactPoint` object; everything else maps to the property
/// named by the field.
pub fn resource_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("title", "Title", true),
        FieldSpec::multiline("description", "Description", true),
        FieldSpec::multi("keyword", "Keywords", false),
        FieldSpec::open_choice("theme", "Research Theme", false),
        FieldSpec::choice("accessLevel", "Access Level", true, ACCESS_LEVELS)
            .with_default("public"),
        FieldSpec::text("license", "License URL", false).with_default(DEFAULT_LICENSE),
        FieldSpec::date("issued", "Date Issued", false),
        FieldSpec::date("modified", "Date Modified", false),
        FieldSpec::text("landingPage", "Landing Page URL", false),
        FieldSpec::text("contact_name", "Contact Name", false),
        FieldSpec::text("contact_email", "Contact Email", false),
    ]
}

/// Look up a field spec by name
#[allow(dead_code)]
pub fn find_field<'a>(fields: &'a [FieldSpec], name: &str) -> Option<&'a FieldSpec> {
    fields.iter().find(|f| f.name == name)
}

/// Patch a fetched vocabulary into the named choice field.
/// A field that is not `Choice`, or an empty term list, is left untouched.
pub fn apply_vocabulary(fields: &mut [FieldSpec], name: &str, terms: &[String]) {
    if terms.is_empty() {
        return;
    }
    if let Some(field) = fields.iter_mut().find(|f| f.name == name) {
        if field.kind == FieldKind::Choice {
            field.allowed_values = Some(terms.to_vec());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_catalog_has_required_title_and_description() {
        let fields = resource_fields();
        let title = find_field(&fields, "title").unwrap();
        assert!(title.required);
        assert_eq!(title.kind, FieldKind::Text);
        let description = find_field(&fields, "description").unwrap();
        assert!(description.required);
        assert_eq!(description.kind, FieldKind::Multiline);
    }

    #[test]
    fn test_access_level_is_constrained_choice() {
        let fields = resource_fields();
        let access = find_field(&fields, "accessLevel").unwrap();
        assert_eq!(access.kind, FieldKind::Choice);
        assert_eq!(
            access.allowed_values.as_deref().unwrap(),
            &["public", "restricted public", "non-public"]
        );
        assert_eq!(access.default_value.as_deref(), Some("public"));
    }

    #[test]
    fn test_theme_starts_unconstrained() {
        let fields = resource_fields();
        let theme = find_field(&fields, "theme").unwrap();
        assert_eq!(theme.kind, FieldKind::Choice);
        assert!(theme.allowed_values.is_none());
    }

    #[test]
    fn test_keyword_is_list_valued() {
        let fields = resource_fields();
        assert_eq!(
            find_field(&fields, "keyword").unwrap().kind,
            FieldKind::MultiChoice
        );
    }

    #[test]
    fn test_license_defaults_to_cc_by() {
        let fields = resource_fields();
        let license = find_field(&fields, "license").unwrap();
        assert_eq!(license.default_value.as_deref(), Some(DEFAULT_LICENSE));
    }

    #[test]
    fn test_apply_vocabulary_patches_theme() {
        let mut fields = resource_fields();
        let terms = vec!["Physics".to_string(), "Chemistry".to_string()];
        apply_vocabulary(&mut fields, "theme", &terms);
        let theme = find_field(&fields, "theme").unwrap();
        assert_eq!(theme.allowed_values.as_deref().unwrap(), terms.as_slice());
    }

    #[test]
    fn test_apply_vocabulary_ignores_empty_terms() {
        let mut fields = resource_fields();
        apply_vocabulary(&mut fields, "theme", &[]);
        assert!(find_field(&fields, "theme").unwrap().allowed_values.is_none());
    }

    #[test]
    fn test_apply_vocabulary_ignores_non_choice_fields() {
        let mut fields = resource_fields();
        apply_vocabulary(&mut fields, "title", &["x".to_string()]);
        assert!(find_field(&fields, "title").unwrap().allowed_values.is_none());
    }

    #[test]
    fn test_unknown_field_lookup_is_none() {
        let fields = resource_fields();
        assert!(find_field(&fields, "nope").is_none());
    }
}
