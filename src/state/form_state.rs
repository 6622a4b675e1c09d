//! Live form values and editing state
//!
//! `FormState` owns the user-entered values keyed by field name. It is a
//! plain state object: the UI layer mutates it through key events, and the
//! validator and document builder consume it as a pure input. Field kinds
//! and constraints live in the static catalog (`schema::FieldSpec`), which
//! the editing operations receive as a parameter.

use crate::schema::{FieldKind, FieldSpec};
use std::collections::HashMap;

/// Value of one form field: free text or an ordered list of entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Whether the field holds no user input
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::List(items) => items.is_empty(),
        }
    }

    /// Text content (empty for list values)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::List(_) => "",
        }
    }

    /// List content (empty for text values)
    pub fn as_list(&self) -> &[String] {
        match self {
            FieldValue::List(items) => items,
            FieldValue::Text(_) => &[],
        }
    }
}

/// User-edited values keyed by field name, plus cursor state
#[derive(Debug, Clone)]
pub struct FormState {
    values: HashMap<String, FieldValue>,
    /// Index into the field catalog; `fields.len()` selects the actions row
    pub active_field: usize,
    /// Entry being typed into the active list field, not yet committed
    pub draft: String,
    /// Which action button is selected when on the actions row (0=Submit, 1=Clear, 2=Quit)
    pub selected_button: usize,
}

impl FormState {
    /// Initialize the form from the field catalog, applying default values
    pub fn new(fields: &[FieldSpec]) -> Self {
        let values = fields
            .iter()
            .map(|spec| {
                let value = match spec.kind {
                    FieldKind::MultiChoice => FieldValue::List(Vec::new()),
                    _ => FieldValue::Text(spec.default_value.clone().unwrap_or_default()),
                };
                (spec.name.clone(), value)
            })
            .collect();
        Self {
            values,
            active_field: 0,
            draft: String::new(),
            selected_button: 0,
        }
    }

    /// Value of the named field, if it exists
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Text content of the named field (empty string when absent)
    pub fn text(&self, name: &str) -> &str {
        self.values.get(name).map(|v| v.as_text()).unwrap_or("")
    }

    /// List content of the named field (empty when absent)
    pub fn list(&self, name: &str) -> &[String] {
        self.values.get(name).map(|v| v.as_list()).unwrap_or(&[])
    }

    /// Whether the named field is empty
    pub fn is_empty(&self, name: &str) -> bool {
        self.values.get(name).map(|v| v.is_empty()).unwrap_or(true)
    }

    /// Overwrite the named field with a text value
    pub fn set_text(&mut self, name: &str, value: impl Into<String>) {
        self.values
            .insert(name.to_string(), FieldValue::Text(value.into()));
    }

    /// Overwrite the named field with a list value
    pub fn set_list(&mut self, name: &str, items: Vec<String>) {
        self.values.insert(name.to_string(), FieldValue::List(items));
    }

    /// Spec of the active field; `None` on the actions row
    pub fn active_spec<'a>(&self, fields: &'a [FieldSpec]) -> Option<&'a FieldSpec> {
        fields.get(self.active_field)
    }

    /// Whether the actions row is selected
    pub fn on_actions_row(&self, fields: &[FieldSpec]) -> bool {
        self.active_field == fields.len()
    }

    /// Move to the next field, wrapping through the actions row
    pub fn next_field(&mut self, fields: &[FieldSpec]) {
        self.active_field = (self.active_field + 1) % (fields.len() + 1);
    }

    /// Move to the previous field, wrapping through the actions row
    pub fn prev_field(&mut self, fields: &[FieldSpec]) {
        if self.active_field == 0 {
            self.active_field = fields.len();
        } else {
            self.active_field -= 1;
        }
    }

    /// Handle character input on the active field.
    ///
    /// List fields accumulate into the draft buffer until committed; choice
    /// fields with a known vocabulary ignore typing (values are cycled), but
    /// accept free text when no vocabulary is available.
    pub fn input_char(&mut self, fields: &[FieldSpec], c: char) {
        let Some(spec) = self.active_spec(fields) else {
            return;
        };
        match spec.kind {
            FieldKind::MultiChoice => self.draft.push(c),
            FieldKind::Choice if spec.allowed_values.is_some() => {}
            _ => {
                let name = spec.name.clone();
                if let Some(FieldValue::Text(s)) = self.values.get_mut(&name) {
                    s.push(c);
                }
            }
        }
    }

    /// Handle backspace on the active field.
    ///
    /// On a list field with an empty draft, removes the last committed entry.
    pub fn backspace(&mut self, fields: &[FieldSpec]) {
        let Some(spec) = self.active_spec(fields) else {
            return;
        };
        match spec.kind {
            FieldKind::MultiChoice => {
                if self.draft.pop().is_none() {
                    let name = spec.name.clone();
                    if let Some(FieldValue::List(items)) = self.values.get_mut(&name) {
                        items.pop();
                    }
                }
            }
            FieldKind::Choice if spec.allowed_values.is_some() => {}
            _ => {
                let name = spec.name.clone();
                if let Some(FieldValue::Text(s)) = self.values.get_mut(&name) {
                    s.pop();
                }
            }
        }
    }

    /// Commit the draft buffer as a new entry of the active list field
    pub fn commit_draft(&mut self, fields: &[FieldSpec]) {
        let Some(spec) = self.active_spec(fields) else {
            return;
        };
        if spec.kind != FieldKind::MultiChoice || self.draft.trim().is_empty() {
            return;
        }
        let entry = self.draft.trim().to_string();
        self.draft.clear();
        let name = spec.name.clone();
        if let Some(FieldValue::List(items)) = self.values.get_mut(&name) {
            items.push(entry);
        }
    }

    /// Append a newline to the active multiline field
    pub fn newline(&mut self, fields: &[FieldSpec]) {
        let Some(spec) = self.active_spec(fields) else {
            return;
        };
        if spec.kind != FieldKind::Multiline {
            return;
        }
        let name = spec.name.clone();
        if let Some(FieldValue::Text(s)) = self.values.get_mut(&name) {
            s.push('\n');
        }
    }

    /// Cycle the active choice field through its vocabulary.
    /// No-op when the field has no vocabulary (free-text fallback).
    pub fn cycle_choice(&mut self, fields: &[FieldSpec], forward: bool) {
        let Some(spec) = self.active_spec(fields) else {
            return;
        };
        let Some(allowed) = spec.allowed_values.as_ref() else {
            return;
        };
        if spec.kind != FieldKind::Choice || allowed.is_empty() {
            return;
        }
        let current = self.text(&spec.name).to_string();
        let pos = allowed.iter().position(|v| *v == current);
        let next = match (pos, forward) {
            // An empty or unknown value starts at the first term
            (None, _) => 0,
            (Some(i), true) => (i + 1) % allowed.len(),
            (Some(0), false) => allowed.len() - 1,
            (Some(i), false) => i - 1,
        };
        let value = allowed[next].clone();
        self.set_text(&spec.name, value);
    }

    /// Reset all fields to their catalog defaults
    pub fn clear(&mut self, fields: &[FieldSpec]) {
        *self = FormState::new(fields);
    }

    /// Cycle the selected action button
    pub fn next_button(&mut self, count: usize) {
        self.selected_button = (self.selected_button + 1) % count;
    }

    /// Cycle the selected action button backwards
    pub fn prev_button(&mut self, count: usize) {
        if self.selected_button == 0 {
            self.selected_button = count - 1;
        } else {
            self.selected_button -= 1;
        }
    }
}
