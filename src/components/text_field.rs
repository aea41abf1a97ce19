use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::config::Theme;

/// Single-line text input used for the topic, keywords and style fields
#[derive(Debug, Clone, Default)]
pub struct TextField {
    value: String,
    /// Cursor position in chars, 0..=len
    cursor: usize,
}

impl TextField {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Insert pasted text at the cursor. Line breaks become spaces.
    pub fn paste_text(&mut self, text: &str) {
        for c in text.chars() {
            match c {
                '\r' => {}
                '\n' | '\t' => self.insert_char(' '),
                c => self.insert_char(c),
            }
        }
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn insert_char(&mut self, c: char) {
        let byte_pos = char_to_byte_pos(&self.value, self.cursor);
        self.value.insert(byte_pos, c);
        self.cursor += 1;
    }

    fn delete_char_before(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let start = char_to_byte_pos(&self.value, self.cursor - 1);
        let end = char_to_byte_pos(&self.value, self.cursor);
        self.value.replace_range(start..end, "");
        self.cursor -= 1;
    }

    fn delete_char_at(&mut self) {
        if self.cursor >= self.len() {
            return;
        }
        let start = char_to_byte_pos(&self.value, self.cursor);
        let end = char_to_byte_pos(&self.value, self.cursor + 1);
        self.value.replace_range(start..end, "");
    }

    fn delete_word_before(&mut self) {
        let chars: Vec<char> = self.value.chars().collect();
        let mut start = self.cursor;
        while start > 0 && chars[start - 1].is_whitespace() {
            start -= 1;
        }
        while start > 0 && !chars[start - 1].is_whitespace() {
            start -= 1;
        }
        let from = char_to_byte_pos(&self.value, start);
        let to = char_to_byte_pos(&self.value, self.cursor);
        self.value.replace_range(from..to, "");
        self.cursor = start;
    }

    /// Apply an editing key. Returns false when the key is not an editing key.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => self.clear(),
            (KeyModifiers::CONTROL, KeyCode::Char('w')) => self.delete_word_before(),
            (KeyModifiers::CONTROL, KeyCode::Char('a')) | (_, KeyCode::Home) => self.cursor = 0,
            (KeyModifiers::CONTROL, KeyCode::Char('e')) | (_, KeyCode::End) => self.cursor = self.len(),
            (KeyModifiers::NONE, KeyCode::Left) => self.cursor = self.cursor.saturating_sub(1),
            (KeyModifiers::NONE, KeyCode::Right) => self.cursor = (self.cursor + 1).min(self.len()),
            (_, KeyCode::Backspace) => self.delete_char_before(),
            (_, KeyCode::Delete) => self.delete_char_at(),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => self.insert_char(c),
            _ => return false,
        }
        true
    }

    /// Render as `label: value`, drawing a block cursor when focused
    pub fn to_line(&self, label: &str, label_width: usize, focused: bool, theme: &Theme) -> Line<'static> {
        let label_style = if focused {
            Style::default()
                .fg(theme.colors.primary.to_color())
                .add_modifier(Modifier::BOLD)
        } else {
            theme.muted_style()
        };
        let text_style = Style::default().fg(theme.colors.foreground.to_color());
        let cursor_style = Style::default()
            .fg(theme.colors.background.to_color())
            .bg(theme.colors.foreground.to_color());

        let mut spans = vec![Span::styled(format!("{:>width$}: ", label, width = label_width), label_style)];

        if !focused {
            spans.push(Span::styled(self.value.clone(), text_style));
            return Line::from(spans);
        }

        let at = char_to_byte_pos(&self.value, self.cursor);
        let (before, rest) = self.value.split_at(at);
        let mut rest_chars = rest.chars();
        let under_cursor = rest_chars.next().map(String::from).unwrap_or_else(|| " ".to_string());

        spans.push(Span::styled(before.to_string(), text_style));
        spans.push(Span::styled(under_cursor, cursor_style));
        spans.push(Span::styled(rest_chars.as_str().to_string(), text_style));
        Line::from(spans)
    }
}

/// Convert a char index to a byte index, clamping to the end of the string
fn char_to_byte_pos(s: &str, char_pos: usize) -> usize {
    s.char_indices()
        .nth(char_pos)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn field_with(text: &str) -> TextField {
        let mut field = TextField::default();
        field.paste_text(text);
        field
    }

    fn type_str(field: &mut TextField, s: &str) {
        for c in s.chars() {
            field.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut field = TextField::default();
        type_str(&mut field, "rusty");
        field.handle_key(key(KeyCode::Backspace));
        assert_eq!(field.value(), "rust");
        assert_eq!(field.cursor, 4);
    }

    #[test]
    fn test_insert_in_middle_with_multibyte() {
        let mut field = field_with("café");
        field.handle_key(key(KeyCode::Left));
        field.handle_key(key(KeyCode::Left));
        type_str(&mut field, "ñ");
        assert_eq!(field.value(), "cañfé");

        field.handle_key(key(KeyCode::Delete));
        assert_eq!(field.value(), "cañé");
    }

    #[test]
    fn test_home_end_and_bounds() {
        let mut field = field_with("abc");
        field.handle_key(key(KeyCode::Right));
        assert_eq!(field.cursor, 3);
        field.handle_key(key(KeyCode::Home));
        field.handle_key(key(KeyCode::Left));
        assert_eq!(field.cursor, 0);
        field.handle_key(key(KeyCode::Backspace));
        assert_eq!(field.value(), "abc");
        field.handle_key(key(KeyCode::End));
        assert_eq!(field.cursor, 3);
    }

    #[test]
    fn test_ctrl_u_and_ctrl_w() {
        let mut field = field_with("home office setup");
        field.handle_key(ctrl('w'));
        assert_eq!(field.value(), "home office ");
        field.handle_key(ctrl('u'));
        assert!(field.value().is_empty());
        assert_eq!(field.cursor, 0);
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut field = TextField::default();
        field.paste_text("one\r\ntwo\nthree");
        assert_eq!(field.value(), "one two three");
    }

    #[test]
    fn test_unhandled_key() {
        let mut field = TextField::default();
        assert!(!field.handle_key(key(KeyCode::Enter)));
        assert!(!field.handle_key(key(KeyCode::Up)));
    }
}
