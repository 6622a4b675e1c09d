//! Application state and core logic

use crate::config::TuiConfig;
use crate::nerdm::{
    build_document, load_document, validate, write_document, RecordEnvelope,
};
use crate::schema::{apply_vocabulary, FieldKind};
use crate::state::{AppState, ExportDialog, View};
use crate::ui::ACTION_BUTTONS;
use crate::vocab::{VocabClient, VocabSource};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use tracing::{info, warn};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Whether the app should quit
    quit: bool,
    /// Destination suggested in the export dialog
    export_path: PathBuf,
}

impl App {
    /// Create a new App instance.
    ///
    /// Runs the one best-effort vocabulary fetch before the event loop
    /// starts; a degraded fetch only downgrades the theme field to free
    /// text. When `record_path` names an existing file, its record is
    /// loaded into the form.
    pub async fn new(record_path: Option<PathBuf>) -> Result<Self> {
        let config = TuiConfig::load().unwrap_or_else(|e| {
            warn!("could not load config, using defaults: {e}");
            TuiConfig::default()
        });
        let mut state = AppState::default();

        let client = VocabClient::new(
            config.vocab_endpoint(),
            config.proxy.as_deref(),
            config.fetch_timeout(),
        );
        let fetch = client.fetch().await;
        apply_vocabulary(&mut state.fields, "theme", fetch.terms());
        state.vocab = Some(fetch);

        let export_path = record_path
            .clone()
            .unwrap_or_else(|| config.export_path());

        if let Some(path) = record_path.filter(|p| p.exists()) {
            match load_document(&path) {
                Ok(doc) => {
                    doc.prefill_form(&mut state.form);
                    info!("loaded record from {}", path.display());
                    state.status_message = Some(format!("Loaded {}", path.display()));
                }
                Err(e) => {
                    state.push_error(format!("Could not load {}: {e}", path.display()));
                }
            }
        }

        Ok(Self {
            state,
            quit: false,
            export_path,
        })
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle a key event; dialogs take precedence over the active view
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.state.current_error().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        if self.state.export_dialog.is_some() {
            self.handle_export_dialog_key(key);
            return Ok(());
        }

        match self.state.current_view {
            View::Form => self.handle_form_key(key),
            View::Preview => self.handle_preview_key(key),
        }
        Ok(())
    }

    /// Handle keys in the form view
    fn handle_form_key(&mut self, key: KeyEvent) {
        let on_actions = self.state.form.on_actions_row(&self.state.fields);
        let active_kind = self
            .state
            .form
            .active_spec(&self.state.fields)
            .map(|spec| (spec.kind, spec.allowed_values.is_some()));

        match key.code {
            KeyCode::Tab => self.state.form.next_field(&self.state.fields),
            KeyCode::BackTab => self.state.form.prev_field(&self.state.fields),
            // Submit shortcut works from anywhere in the form
            KeyCode::Char('s')
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    || key.modifiers.contains(crate::platform::SUBMIT_MODIFIER) =>
            {
                self.submit();
            }
            // Action panel navigation
            KeyCode::Up | KeyCode::Char('k') if on_actions => {
                self.state.form.prev_button(ACTION_BUTTONS.len());
            }
            KeyCode::Down | KeyCode::Char('j') if on_actions => {
                self.state.form.next_button(ACTION_BUTTONS.len());
            }
            KeyCode::Enter if on_actions => match self.state.form.selected_button {
                0 => self.submit(),
                1 => self.clear_form(),
                2 => self.quit = true,
                _ => {}
            },
            // Field navigation with arrows
            KeyCode::Up => self.state.form.prev_field(&self.state.fields),
            KeyCode::Down => self.state.form.next_field(&self.state.fields),
            // Constrained choice fields cycle with Left/Right
            KeyCode::Left if matches!(active_kind, Some((FieldKind::Choice, true))) => {
                self.state.form.cycle_choice(&self.state.fields, false);
            }
            KeyCode::Right if matches!(active_kind, Some((FieldKind::Choice, true))) => {
                self.state.form.cycle_choice(&self.state.fields, true);
            }
            KeyCode::Enter => match active_kind {
                Some((FieldKind::Multiline, _)) => self.state.form.newline(&self.state.fields),
                Some((FieldKind::MultiChoice, _)) => {
                    self.state.form.commit_draft(&self.state.fields)
                }
                _ => self.state.form.next_field(&self.state.fields),
            },
            KeyCode::Char(c) => self.state.form.input_char(&self.state.fields, c),
            KeyCode::Backspace => self.state.form.backspace(&self.state.fields),
            _ => {}
        }
    }

    /// Handle keys in the preview view
    fn handle_preview_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('e') => self.open_export_dialog(),
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.open_export_dialog();
            }
            KeyCode::Esc => {
                self.state.current_view = View::Form;
                self.state.status_message = None;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.preview_scroll = self.state.preview_scroll.saturating_add(1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.preview_scroll = self.state.preview_scroll.saturating_sub(1);
            }
            _ => {}
        }
    }

    /// Handle keys in the export-path dialog
    fn handle_export_dialog_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let path = match self.state.export_dialog.take() {
                    Some(dialog) => PathBuf::from(dialog.path),
                    None => return,
                };
                self.export(path);
            }
            KeyCode::Esc => {
                self.state.export_dialog = None;
            }
            KeyCode::Char(c) => {
                if let Some(dialog) = &mut self.state.export_dialog {
                    dialog.push_char(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(dialog) = &mut self.state.export_dialog {
                    dialog.backspace();
                }
            }
            _ => {}
        }
    }

    /// Validate the form; on success build the document and show the preview
    fn submit(&mut self) {
        match validate(&self.state.form, &self.state.fields) {
            Ok(validated) => {
                let doc = build_document(validated, RecordEnvelope::generate());
                self.state.failures.clear();
                self.state.document = Some(doc);
                self.state.preview_scroll = 0;
                self.state.current_view = View::Preview;
                self.state.status_message = Some("Document built — review and export".to_string());
            }
            Err(failures) => {
                info!("validation failed for {} field(s)", failures.len());
                self.state.status_message =
                    Some(format!("{} field(s) need attention", failures.len()));
                self.state.failures = failures;
            }
        }
    }

    /// Reset the form to its defaults
    fn clear_form(&mut self) {
        self.state.form.clear(&self.state.fields);
        self.state.failures.clear();
        self.state.document = None;
        self.state.status_message = Some("Form cleared".to_string());
    }

    /// Open the export dialog prefilled with the suggested destination
    fn open_export_dialog(&mut self) {
        if self.state.document.is_none() {
            self.state.push_error("Nothing to export yet");
            return;
        }
        self.state.export_dialog = Some(ExportDialog::with_path(
            self.export_path.display().to_string(),
        ));
    }

    /// Write the built document to `path`
    fn export(&mut self, path: PathBuf) {
        let Some(doc) = &self.state.document else {
            self.state.push_error("Nothing to export yet");
            return;
        };
        match write_document(doc, &path) {
            Ok(()) => {
                info!("exported record to {}", path.display());
                self.state.status_message = Some(format!("Saved to {}", path.display()));
                self.export_path = path;
            }
            Err(e) => {
                self.state.push_error(format!("Export failed: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nerdm::FailureReason;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;

    /// App with no config file dependence and no network: state assembled
    /// the way `App::new` does, minus the startup fetch.
    fn offline_app() -> App {
        App {
            state: AppState::default(),
            quit: false,
            export_path: PathBuf::from("record.json"),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_typing_edits_the_active_field() {
        let mut app = offline_app();
        type_text(&mut app, "Dataset A");
        assert_eq!(app.state.form.text("title"), "Dataset A");
    }

    #[test]
    fn test_submit_with_missing_required_fields_shows_failures_inline() {
        let mut app = offline_app();
        app.handle_key(ctrl('s')).unwrap();

        assert_eq!(app.state.current_view, View::Form);
        assert!(app.state.document.is_none());
        let failure = app.state.failure_for("title").unwrap();
        assert_eq!(failure.reason, FailureReason::Required);
        assert!(app.state.failure_for("description").is_some());
    }

    #[test]
    fn test_submit_with_valid_form_builds_document_and_opens_preview() {
        let mut app = offline_app();
        app.state.form.set_text("title", "Dataset A");
        app.state.form.set_text("description", "abc");
        app.handle_key(ctrl('s')).unwrap();

        assert_eq!(app.state.current_view, View::Preview);
        let doc = app.state.document.as_ref().unwrap();
        assert_eq!(doc.title, "Dataset A");
        assert!(app.state.failures.is_empty());
    }

    #[test]
    fn test_resubmit_clears_previous_failures() {
        let mut app = offline_app();
        app.handle_key(ctrl('s')).unwrap();
        assert!(!app.state.failures.is_empty());

        app.state.form.set_text("title", "T");
        app.state.form.set_text("description", "D");
        app.handle_key(ctrl('s')).unwrap();
        assert!(app.state.failures.is_empty());
    }

    #[test]
    fn test_export_through_dialog_writes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.json");

        let mut app = offline_app();
        app.state.form.set_text("title", "Dataset A");
        app.state.form.set_text("description", "abc");
        app.handle_key(ctrl('s')).unwrap();

        app.handle_key(key(KeyCode::Enter)).unwrap(); // open dialog
        assert!(app.state.export_dialog.is_some());
        app.state.export_dialog.as_mut().unwrap().path = dest.display().to_string();
        app.handle_key(key(KeyCode::Enter)).unwrap(); // write

        assert!(dest.exists());
        let restored = load_document(&dest).unwrap();
        assert_eq!(restored.title, "Dataset A");
        assert!(app
            .state
            .status_message
            .as_deref()
            .unwrap()
            .starts_with("Saved to"));
    }

    #[test]
    fn test_export_failure_queues_error_and_aborts() {
        let mut app = offline_app();
        app.state.form.set_text("title", "T");
        app.state.form.set_text("description", "D");
        app.handle_key(ctrl('s')).unwrap();

        app.handle_key(key(KeyCode::Enter)).unwrap();
        app.state.export_dialog.as_mut().unwrap().path =
            "/nonexistent-dir-for-sure/out.json".to_string();
        app.handle_key(key(KeyCode::Enter)).unwrap();

        assert!(app.state.current_error().unwrap().starts_with("Export failed"));
        // Dismissing the error returns to the preview
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(app.state.current_error().is_none());
        assert_eq!(app.state.current_view, View::Preview);
    }

    #[test]
    fn test_quit_button_on_actions_row() {
        let mut app = offline_app();
        app.state.form.active_field = app.state.fields.len();
        app.state.form.selected_button = 2;
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(app.should_quit());
    }

    #[test]
    fn test_clear_button_restores_defaults() {
        let mut app = offline_app();
        type_text(&mut app, "junk");
        app.state.form.active_field = app.state.fields.len();
        app.state.form.selected_button = 1;
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.state.form.text("title"), "");
        assert_eq!(app.state.form.text("accessLevel"), "public");
    }

    #[test]
    fn test_preview_esc_returns_to_form() {
        let mut app = offline_app();
        app.state.form.set_text("title", "T");
        app.state.form.set_text("description", "D");
        app.handle_key(ctrl('s')).unwrap();
        assert_eq!(app.state.current_view, View::Preview);

        app.handle_key(key(KeyCode::Esc)).unwrap();
        assert_eq!(app.state.current_view, View::Form);
    }

    #[test]
    fn test_export_without_document_is_rejected() {
        let mut app = offline_app();
        app.state.current_view = View::Preview;
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(app.state.export_dialog.is_none());
        assert_eq!(app.state.current_error(), Some("Nothing to export yet"));
    }

    #[test]
    fn test_arrow_keys_cycle_constrained_choice() {
        let mut app = offline_app();
        let access_index = app
            .state
            .fields
            .iter()
            .position(|f| f.name == "accessLevel")
            .unwrap();
        app.state.form.active_field = access_index;
        app.handle_key(key(KeyCode::Right)).unwrap();
        assert_eq!(app.state.form.text("accessLevel"), "restricted public");
        app.handle_key(key(KeyCode::Left)).unwrap();
        assert_eq!(app.state.form.text("accessLevel"), "public");
    }
}
