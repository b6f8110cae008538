//! The calculator session: one input editor plus its history.

use tracing::trace;

use crate::config::Config;
use crate::editor::InputEditor;
use crate::history::{HistoryEntry, HistoryLog};
use crate::keys::Key;

/// What the presentation layer needs to draw the calculator screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    /// Canonical expression.
    pub expression: String,
    /// Expression with display glyphs.
    pub display: String,
    /// Live result, or empty.
    pub preview: String,
    /// The display holds a committed answer (drawn highlighted).
    pub showing_answer: bool,
    pub backspace_enabled: bool,
}

/// Owns the editor and the history for one run of the calculator.
#[derive(Clone, Debug, Default)]
pub struct Session {
    editor: InputEditor,
    history: HistoryLog,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            editor: InputEditor::new()
                .with_precision(config.precision)
                .with_live_preview(config.live_preview),
            history: HistoryLog::new(),
        }
    }

    /// Apply one key press.
    pub fn press(&mut self, key: Key) {
        trace!(%key, "key pressed");

        if let Some(token) = key.token() {
            let mut buf = [0u8; 4];
            self.editor.insert(token.encode_utf8(&mut buf));
            return;
        }

        match key {
            Key::Parenthesis => self.editor.toggle_parenthesis(),
            Key::Percent => self.editor.apply_percent(),
            Key::ToggleSign => self.editor.toggle_sign(),
            Key::Clear => self.editor.clear(),
            Key::Backspace => self.editor.backspace(),
            Key::Equals => {
                self.commit();
            }
            Key::ClearHistory => self.history.clear(),
            Key::Caret { start, end } => self.editor.set_caret(start, end),
            Key::Digit(_) | Key::Point | Key::Operator(_) | Key::Open | Key::Close => {}
        }
    }

    /// Apply a sequence of key presses in order.
    pub fn press_all(&mut self, keys: impl IntoIterator<Item = Key>) {
        for key in keys {
            self.press(key);
        }
    }

    /// Evaluate the expression and record it in the history.
    pub fn commit(&mut self) -> Option<&HistoryEntry> {
        let entry = self.editor.commit()?;
        self.history.append(entry);
        self.history.last()
    }

    pub fn screen(&self) -> Screen {
        Screen {
            expression: self.editor.expression().to_string(),
            display: self.editor.display().to_string(),
            preview: self.editor.preview().to_string(),
            showing_answer: self.editor.is_showing_answer(),
            backspace_enabled: self.editor.can_backspace(),
        }
    }

    pub fn editor(&self) -> &InputEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut InputEditor {
        &mut self.editor
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
