//! Single-line text input component.
//!
//! The cursor is tracked in characters, not bytes, so names like "Peña" or
//! "Núñez" edit correctly.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme::theme;

/// A text input widget.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    /// The current input value.
    value: String,
    /// Cursor position in characters.
    cursor: usize,
    /// Placeholder text shown when empty.
    placeholder: String,
}

impl TextInput {
    /// Create a new empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new input with an initial value and the cursor at the end.
    pub fn with_value(value: impl Into<String>) -> Self {
        let mut input = Self::new();
        input.set_value(value);
        input
    }

    /// Set the placeholder text.
    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    /// Get the current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Set the value and move cursor to end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.char_count();
    }

    /// Clear the input.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Check if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Get the cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    /// Byte offset of a character position.
    fn byte_index(&self, char_pos: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Handle keyboard input.
    ///
    /// Returns true if the value was modified.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                let at = self.byte_index(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                true
            }
            (KeyCode::Backspace, _) => {
                if self.cursor == 0 {
                    return false;
                }
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                true
            }
            (KeyCode::Delete, _) => {
                if self.cursor >= self.char_count() {
                    return false;
                }
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                true
            }
            (KeyCode::Left, KeyModifiers::NONE) => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            (KeyCode::Right, KeyModifiers::NONE) => {
                self.cursor = (self.cursor + 1).min(self.char_count());
                false
            }
            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.cursor = 0;
                false
            }
            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor = self.char_count();
                false
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                if self.value.is_empty() {
                    return false;
                }
                self.clear();
                true
            }
            // Delete the word before the cursor
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
                if self.cursor == 0 {
                    return false;
                }
                let end = self.byte_index(self.cursor);
                let start = self.value[..end]
                    .trim_end()
                    .rfind(char::is_whitespace)
                    .map(|i| i + 1)
                    .unwrap_or(0);
                self.value.replace_range(start..end, "");
                self.cursor = self.value[..start].chars().count();
                true
            }
            _ => false,
        }
    }

    /// Render the input with a bordered label.
    pub fn render_with_label(&self, frame: &mut Frame, area: Rect, label: &str, focused: bool) {
        let t = theme();

        let (display, style) = if self.value.is_empty() {
            (self.placeholder.as_str(), Style::default().fg(t.input_placeholder))
        } else {
            (self.value.as_str(), Style::default().fg(t.input_fg))
        };

        let (border_style, title_style) = if focused {
            (
                Style::default().fg(t.border_focused),
                Style::default()
                    .fg(t.border_focused)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (Style::default().fg(t.border), Style::default().fg(t.fg))
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        frame.render_widget(Paragraph::new(display).style(style).block(block), area);

        if focused {
            let cursor_x = area.x + 1 + self.cursor as u16;
            let cursor_y = area.y + 1;

            if cursor_x < area.x + area.width.saturating_sub(1) {
                frame.set_cursor_position(Position::new(cursor_x, cursor_y));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut TextInput, code: KeyCode) -> bool {
        input.handle_input(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_new_input() {
        let input = TextInput::new();
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_with_value_counts_chars() {
        let input = TextInput::with_value("Peña");
        assert_eq!(input.cursor(), 4);
    }

    #[test]
    fn test_character_input() {
        let mut input = TextInput::new();
        assert!(press(&mut input, KeyCode::Char('a')));
        assert!(input.handle_input(KeyEvent::new(KeyCode::Char('B'), KeyModifiers::SHIFT)));
        assert_eq!(input.value(), "aB");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = TextInput::with_value("Nuez");
        input.cursor = 2;
        press(&mut input, KeyCode::Backspace);
        press(&mut input, KeyCode::Char('ú'));
        press(&mut input, KeyCode::Char('ñ'));
        assert_eq!(input.value(), "Núñez");
        assert_eq!(input.cursor(), 3);

        press(&mut input, KeyCode::Left);
        assert!(press(&mut input, KeyCode::Delete));
        assert_eq!(input.value(), "Núez");
    }

    #[test]
    fn test_backspace_at_start() {
        let mut input = TextInput::with_value("abc");
        input.cursor = 0;
        assert!(!press(&mut input, KeyCode::Backspace));
        assert_eq!(input.value(), "abc");
    }

    #[test]
    fn test_delete_at_end() {
        let mut input = TextInput::with_value("abc");
        assert!(!press(&mut input, KeyCode::Delete));
    }

    #[test]
    fn test_cursor_bounds() {
        let mut input = TextInput::with_value("ab");
        press(&mut input, KeyCode::Right);
        assert_eq!(input.cursor(), 2);
        press(&mut input, KeyCode::Home);
        press(&mut input, KeyCode::Left);
        assert_eq!(input.cursor(), 0);
        press(&mut input, KeyCode::End);
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_ctrl_u_clear() {
        let mut input = TextInput::with_value("hello");
        assert!(input.handle_input(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)));
        assert!(input.is_empty());
        assert!(!input.handle_input(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_ctrl_w_delete_word() {
        let mut input = TextInput::with_value("Av. Arce 1234");
        assert!(input.handle_input(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL)));
        assert_eq!(input.value(), "Av. Arce ");
        assert_eq!(input.cursor(), 9);
    }

    #[test]
    fn test_insert_in_middle() {
        let mut input = TextInput::with_value("ac");
        input.cursor = 1;
        press(&mut input, KeyCode::Char('b'));
        assert_eq!(input.value(), "abc");
        assert_eq!(input.cursor(), 2);
    }
}
