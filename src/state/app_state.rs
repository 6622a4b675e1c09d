//! Application state definitions

use crate::nerdm::{FieldFailure, NerdmDocument};
use crate::schema::{resource_fields, FieldSpec};
use crate::state::FormState;
use crate::vocab::VocabFetch;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// The record form
    #[default]
    Form,
    /// Read-only JSON preview of the built document
    Preview,
}

/// State of the export-path dialog
#[derive(Debug, Clone, Default)]
pub struct ExportDialog {
    /// Destination path being edited
    pub path: String,
}

impl ExportDialog {
    pub fn with_path(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn push_char(&mut self, c: char) {
        self.path.push(c);
    }

    pub fn backspace(&mut self) {
        self.path.pop();
    }
}

/// Main application state
pub struct AppState {
    // Navigation
    pub current_view: View,

    // Form
    /// Field catalog; immutable except for the vocabulary patch at startup
    pub fields: Vec<FieldSpec>,
    pub form: FormState,
    /// Failures from the last submit, shown inline next to their fields
    pub failures: Vec<FieldFailure>,

    // Document
    /// Built from the last successful validation; feeds preview and export
    pub document: Option<NerdmDocument>,

    // Vocabulary
    /// Outcome of the startup fetch; `None` until the fetch ran
    pub vocab: Option<VocabFetch>,

    // UI state
    pub status_message: Option<String>,
    pub export_dialog: Option<ExportDialog>,
    pub preview_scroll: u16,
    errors: Vec<String>,
}

impl Default for AppState {
    fn default() -> Self {
        let fields = resource_fields();
        let form = FormState::new(&fields);
        Self {
            current_view: View::default(),
            fields,
            form,
            failures: Vec::new(),
            document: None,
            vocab: None,
            status_message: None,
            export_dialog: None,
            preview_scroll: 0,
            errors: Vec::new(),
        }
    }
}

impl AppState {
    /// Queue an error message for the error dialog
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// The error currently shown, if any
    pub fn current_error(&self) -> Option<&str> {
        self.errors.first().map(|s| s.as_str())
    }

    /// Dismiss the error currently shown
    pub fn dismiss_error(&mut self) {
        if !self.errors.is_empty() {
            self.errors.remove(0);
        }
    }

    /// Failure recorded for the named field in the last submit
    pub fn failure_for(&self, name: &str) -> Option<&FieldFailure> {
        self.failures.iter().find(|f| f.field == name)
    }

    /// Whether the startup vocabulary fetch degraded
    pub fn vocab_degraded(&self) -> bool {
        self.vocab.as_ref().is_some_and(|v| v.is_degraded())
    }
}
