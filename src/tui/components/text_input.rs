use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key did to a text field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Not an editing key; translate it to an action instead
    Ignored,
    /// Cursor moved, value unchanged
    Moved,
    /// Value changed
    Changed,
}

/// Single-line editable text with a character cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    /// Cursor position in characters, not bytes
    cursor: usize,
    masked: bool,
}

const MASK: char = '•';

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn masked() -> Self {
        Self {
            masked: true,
            ..Self::default()
        }
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        let mut input = Self::new();
        input.set_value(value);
        input
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the value, cursor at end
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    /// Text as it should be drawn
    pub fn display(&self) -> String {
        if self.masked {
            std::iter::repeat_n(MASK, self.value.chars().count()).collect()
        } else {
            self.value.clone()
        }
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.value.chars().count() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
        true
    }

    /// Apply an editing key
    ///
    /// Ctrl/Alt chords are left for the keybindings so shortcuts keep
    /// working while a field has focus.
    pub fn handle_key(&mut self, key: &KeyEvent) -> InputOutcome {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return InputOutcome::Ignored;
        }
        let len = self.value.chars().count();
        match key.code {
            KeyCode::Char(ch) => {
                self.insert(ch);
                InputOutcome::Changed
            }
            KeyCode::Backspace => {
                if self.backspace() {
                    InputOutcome::Changed
                } else {
                    InputOutcome::Moved
                }
            }
            KeyCode::Delete => {
                if self.delete() {
                    InputOutcome::Changed
                } else {
                    InputOutcome::Moved
                }
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                InputOutcome::Moved
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(len);
                InputOutcome::Moved
            }
            KeyCode::Home => {
                self.cursor = 0;
                InputOutcome::Moved
            }
            KeyCode::End => {
                self.cursor = len;
                InputOutcome::Moved
            }
            _ => InputOutcome::Ignored,
        }
    }
}
