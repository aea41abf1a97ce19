use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::components::text_field::TextField;
use crate::config::Theme;
use crate::dispatch::{FieldKind, FieldSource, InputField, Platform};

/// Topic, keywords and style inputs of one platform panel
#[derive(Debug, Clone)]
pub struct PlatformForm {
    platform: Platform,
    fields: [TextField; 3],
    selected: FieldKind,
}

impl PlatformForm {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            fields: Default::default(),
            selected: FieldKind::Topic,
        }
    }

    pub fn field(&self, kind: FieldKind) -> &TextField {
        &self.fields[kind.index()]
    }

    pub fn field_mut(&mut self, kind: FieldKind) -> &mut TextField {
        &mut self.fields[kind.index()]
    }

    pub fn select_next(&mut self) {
        let idx = (self.selected.index() + 1) % FieldKind::ALL.len();
        self.selected = FieldKind::ALL[idx];
    }

    pub fn select_prev(&mut self) {
        let len = FieldKind::ALL.len();
        let idx = (self.selected.index() + len - 1) % len;
        self.selected = FieldKind::ALL[idx];
    }

    pub fn paste_text(&mut self, text: &str) {
        let kind = self.selected;
        self.field_mut(kind).paste_text(text);
    }

    /// Field navigation and editing. Returns false for keys the form ignores.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Up) => {
                self.select_prev();
                true
            }
            (KeyModifiers::NONE, KeyCode::Down) => {
                self.select_next();
                true
            }
            _ => {
                let kind = self.selected;
                self.field_mut(kind).handle_key(key)
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        let block = Block::default()
            .title(format!(" {} inputs ", self.platform.label()))
            .title_style(theme.title_style(focused))
            .borders(Borders::ALL)
            .border_style(theme.border_style(focused));

        let label_width = FieldKind::ALL
            .iter()
            .map(|k| k.label().len())
            .max()
            .unwrap_or(0);

        let lines: Vec<Line> = FieldKind::ALL
            .iter()
            .map(|kind| {
                let is_cursor_field = focused && *kind == self.selected;
                self.field(*kind).to_line(kind.label(), label_width, is_cursor_field, theme)
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// Every platform's form; the UI's field source for dispatch
#[derive(Debug, Clone)]
pub struct Forms {
    forms: [PlatformForm; 4],
}

impl Forms {
    pub fn new() -> Self {
        Self {
            forms: Platform::ALL.map(PlatformForm::new),
        }
    }

    pub fn get(&self, platform: Platform) -> &PlatformForm {
        &self.forms[platform.index()]
    }

    pub fn get_mut(&mut self, platform: Platform) -> &mut PlatformForm {
        &mut self.forms[platform.index()]
    }
}

impl Default for Forms {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldSource for Forms {
    fn read(&self, field: InputField) -> String {
        self.get(field.platform).field(field.kind).value().to_string()
    }
}
