//! Text entry for the holder of a new high score.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::term::{FormField, RecordFormView};

/// Longest accepted field, in characters
pub const MAX_FIELD_CHARS: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    Editing,
    Submit,
    /// Save with default holder details
    Skip,
    Quit,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordForm {
    name: String,
    country: String,
    focus: FormField,
}

impl RecordForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn view(&self) -> RecordFormView<'_> {
        RecordFormView {
            name: &self.name,
            country: &self.country,
            focus: self.focus,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Name => &mut self.name,
            FormField::Country => &mut self.country,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('C') => FormOutcome::Quit,
                _ => FormOutcome::Editing,
            };
        }

        match key.code {
            KeyCode::Enter => return FormOutcome::Submit,
            KeyCode::Esc => return FormOutcome::Skip,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = match self.focus {
                    FormField::Name => FormField::Country,
                    FormField::Country => FormField::Name,
                };
            }
            KeyCode::Backspace => {
                self.focused_mut().pop();
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                let field = self.focused_mut();
                if field.chars().count() < MAX_FIELD_CHARS {
                    field.push(ch);
                }
            }
            _ => {}
        }
        FormOutcome::Editing
    }
}
