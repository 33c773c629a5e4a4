//! Modal dialog component for record editing and system messages.
//!
//! A single component hosts every modal: the pilot, car and race forms, the
//! delete confirmation gate, and the info, help and logs viewers.

use crate::forms::{CarForm, EntityForm, FieldErrors, FormField, PilotForm, RaceForm};
use crate::models::{EntityId, EntityKind, Relations};
use crate::ui::components::dialogs::form_dialogs::{self, FormView};
use crate::ui::components::dialogs::scroll_behavior::ScrollState;
use crate::ui::components::dialogs::system_dialogs;
use crate::ui::core::{
    actions::{Action, DialogType, EditTarget, FormToken},
    Component,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{layout::Rect, Frame};

fn byte_pos(text: &str, chars: usize) -> usize {
    text.chars().take(chars).map(|ch| ch.len_utf8()).sum()
}

/// Local state of an open pilot, car or race form.
#[derive(Debug, Clone)]
pub struct FormState {
    pub token: FormToken,
    pub form: EntityForm,
    /// `None` while creating a record
    pub editing_id: Option<EntityId>,
    pub focused: usize,
    pub cursor_position: usize,
    pub picker_cursor: usize,
    pub errors: FieldErrors,
    pub submitting: bool,
    pub server_error: Option<String>,
}

impl FormState {
    fn new(token: FormToken, form: EntityForm, editing_id: Option<EntityId>) -> Self {
        let mut state = Self {
            token,
            form,
            editing_id,
            focused: 0,
            cursor_position: 0,
            picker_cursor: 0,
            errors: FieldErrors::new(),
            submitting: false,
            server_error: None,
        };
        state.move_cursor_to_end();
        state
    }

    pub fn focused_field(&self) -> FormField {
        let fields = self.form.fields();
        fields[self.focused.min(fields.len() - 1)]
    }

    pub fn title(&self) -> String {
        let kind = self.form.kind();
        match self.editing_id {
            Some(id) => format!(" ✏ Edit {} #{} ", kind.noun(), id),
            None => format!(" ➕ New {} ", kind.noun()),
        }
    }

    fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % self.form.fields().len();
        self.picker_cursor = 0;
        self.move_cursor_to_end();
    }

    fn focus_previous(&mut self) {
        let count = self.form.fields().len();
        self.focused = (self.focused + count - 1) % count;
        self.picker_cursor = 0;
        self.move_cursor_to_end();
    }

    fn move_cursor_to_end(&mut self) {
        self.cursor_position = self
            .form
            .text(self.focused_field())
            .map(|text| text.chars().count())
            .unwrap_or(0);
    }

    /// Validate and, when clean, hand the payload to the app
    fn submit(&mut self) -> Action {
        if self.submitting {
            return Action::None;
        }

        match self.form.to_payload() {
            Ok(payload) => {
                self.errors.clear();
                self.server_error = None;
                self.submitting = true;
                Action::Submit {
                    token: self.token,
                    id: self.editing_id,
                    payload,
                }
            }
            Err(errors) => {
                self.errors = errors;
                Action::None
            }
        }
    }

    fn handle_text_key(&mut self, key: KeyEvent) {
        let field = self.focused_field();
        let cursor = self.cursor_position;
        let Some(buffer) = self.form.text_mut(field) else {
            return;
        };
        let char_count = buffer.chars().count();

        let changed = match key.code {
            KeyCode::Char(c) => {
                if field.is_numeric() && !(c.is_ascii_digit() || (c == '-' && cursor == 0)) {
                    return;
                }
                let pos = byte_pos(buffer.as_str(), cursor);
                buffer.insert(pos, c);
                self.cursor_position += 1;
                true
            }
            KeyCode::Backspace if cursor > 0 => {
                let pos = byte_pos(buffer.as_str(), cursor - 1);
                buffer.remove(pos);
                self.cursor_position -= 1;
                true
            }
            KeyCode::Delete if cursor < char_count => {
                let pos = byte_pos(buffer.as_str(), cursor);
                buffer.remove(pos);
                true
            }
            KeyCode::Left => {
                self.cursor_position = cursor.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                self.cursor_position = (cursor + 1).min(char_count);
                false
            }
            KeyCode::Home => {
                self.cursor_position = 0;
                false
            }
            KeyCode::End => {
                self.cursor_position = char_count;
                false
            }
            _ => false,
        };

        if changed {
            self.errors.remove(&field);
        }
    }

    fn handle_picker_key(&mut self, key: KeyEvent, relations: &Relations) {
        let field = self.focused_field();
        let options = form_dialogs::picker_options(field, relations);
        if options.is_empty() {
            return;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.picker_cursor = self.picker_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.picker_cursor = (self.picker_cursor + 1).min(options.len() - 1);
            }
            KeyCode::Char(' ') | KeyCode::Char('x') => {
                if let Some((id, _)) = options.get(self.picker_cursor) {
                    self.form.toggle_selection(field, *id);
                    self.errors.remove(&field);
                }
            }
            _ => {}
        }
    }
}

/// Modal dialog component.
///
/// Holds the cached relation lists so pickers can render without asking the
/// app; the lists are empty until the first relations load completes.
pub struct DialogComponent {
    pub dialog_type: Option<DialogType>,
    pub form: Option<FormState>,
    pub relations: Relations,
    pub logs: Vec<String>,
    pub scroll: ScrollState,
    next_token: FormToken,
}

impl Default for DialogComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogComponent {
    pub fn new() -> Self {
        Self {
            dialog_type: None,
            form: None,
            relations: Relations::default(),
            logs: Vec::new(),
            scroll: ScrollState::default(),
            next_token: 1,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.dialog_type.is_some()
    }

    /// Whether a pilot, car or race form is open
    pub fn is_form_open(&self) -> bool {
        self.form.is_some()
    }

    /// Kind of the record the open form edits
    pub fn form_kind(&self) -> Option<EntityKind> {
        self.form.as_ref().map(|state| state.form.kind())
    }

    pub fn set_relations(&mut self, relations: Relations) {
        self.relations = relations;
        if let Some(state) = self.form.as_mut() {
            let options = form_dialogs::picker_options(state.focused_field(), &self.relations);
            state.picker_cursor = state.picker_cursor.min(options.len().saturating_sub(1));
        }
    }

    pub fn set_logs(&mut self, logs: Vec<String>) {
        self.logs = logs;
    }

    fn open(&mut self, dialog_type: DialogType) {
        self.clear_dialog();
        let token = self.next_token;
        self.next_token += 1;
        self.form = match &dialog_type {
            DialogType::Create(kind) => Some(FormState::new(token, EntityForm::empty(*kind), None)),
            DialogType::Edit(target) => {
                let form = match target {
                    EditTarget::Pilot(pilot) => EntityForm::Pilot(PilotForm::from_pilot(pilot)),
                    EditTarget::Car(car) => EntityForm::Car(CarForm::from_car(car)),
                    EditTarget::Race(race) => EntityForm::Race(RaceForm::from_race(race)),
                };
                Some(FormState::new(token, form, Some(target.id())))
            }
            _ => None,
        };
        self.dialog_type = Some(dialog_type);
    }

    fn clear_dialog(&mut self) {
        self.dialog_type = None;
        self.form = None;
        self.scroll.reset();
    }

    fn handle_scroll_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll.scroll_down(),
            KeyCode::PageUp => self.scroll.page_up(),
            KeyCode::PageDown => self.scroll.page_down(),
            KeyCode::Home => self.scroll.scroll_to_top(),
            KeyCode::End => self.scroll.scroll_to_bottom(),
            _ => return false,
        }
        true
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Action {
        let Some(state) = self.form.as_mut() else {
            return Action::None;
        };

        match key.code {
            KeyCode::Esc => Action::HideDialog,
            KeyCode::Enter => state.submit(),
            KeyCode::Tab => {
                state.focus_next();
                Action::None
            }
            KeyCode::BackTab => {
                state.focus_previous();
                Action::None
            }
            _ if state.focused_field().is_text() => {
                match key.code {
                    KeyCode::Down => state.focus_next(),
                    KeyCode::Up => state.focus_previous(),
                    _ => state.handle_text_key(key),
                }
                Action::None
            }
            _ => {
                state.handle_picker_key(key, &self.relations);
                Action::None
            }
        }
    }
}

impl Component for DialogComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        let Some(dialog_type) = self.dialog_type.clone() else {
            return Action::None;
        };

        match dialog_type {
            DialogType::Create(_) | DialogType::Edit(_) => self.handle_form_key(key),
            DialogType::DeleteConfirmation { kind, id, .. } => match key.code {
                KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.clear_dialog();
                    Action::Delete { kind, id }
                }
                KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => Action::HideDialog,
                _ => Action::None,
            },
            DialogType::Info { .. } => {
                if self.handle_scroll_key(key) {
                    Action::None
                } else {
                    // Any other key dismisses the dialog
                    Action::HideDialog
                }
            }
            DialogType::Help => match key.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Action::HideDialog,
                _ => {
                    self.handle_scroll_key(key);
                    Action::None
                }
            },
            DialogType::Logs => match key.code {
                KeyCode::Esc | KeyCode::Char('L') | KeyCode::Char('q') => Action::HideDialog,
                _ => {
                    self.handle_scroll_key(key);
                    Action::None
                }
            },
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::ShowDialog(dialog_type) => {
                self.open(dialog_type);
                Action::None
            }
            Action::HideDialog => {
                self.clear_dialog();
                Action::None
            }
            // Never cover a form or confirmation the user opened meanwhile
            Action::RecordLoaded { title, message } if !self.is_visible() => {
                self.open(DialogType::Info { title, message });
                Action::None
            }
            // A result only belongs to the form instance that sent it
            Action::SubmitSucceeded { token, .. } => {
                if self.form.as_ref().is_some_and(|state| state.token == token) {
                    self.clear_dialog();
                }
                action
            }
            Action::SubmitFailed { token, ref message, .. } => {
                if let Some(state) = self.form.as_mut().filter(|state| state.token == token) {
                    state.submitting = false;
                    state.server_error = Some(message.clone());
                }
                action
            }
            _ => action,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let Some(dialog_type) = self.dialog_type.clone() else {
            return;
        };

        match dialog_type {
            DialogType::Create(_) | DialogType::Edit(_) => {
                if let Some(state) = &self.form {
                    let title = state.title();
                    let view = FormView {
                        title: &title,
                        form: &state.form,
                        focused: state.focused,
                        cursor_position: state.cursor_position,
                        picker_cursor: state.picker_cursor,
                        errors: &state.errors,
                        relations: &self.relations,
                        submitting: state.submitting,
                        server_error: state.server_error.as_deref(),
                    };
                    form_dialogs::render_form_dialog(f, rect, &view);
                }
            }
            DialogType::DeleteConfirmation { kind, label, .. } => {
                system_dialogs::render_delete_confirmation_dialog(f, rect, kind, &label);
            }
            DialogType::Info { title, message } => {
                system_dialogs::render_info_dialog(f, rect, &title, &message, &mut self.scroll);
            }
            DialogType::Help => system_dialogs::render_help_dialog(f, rect, &mut self.scroll),
            DialogType::Logs => system_dialogs::render_logs_dialog(f, rect, &self.logs, &mut self.scroll),
        }
    }
}
