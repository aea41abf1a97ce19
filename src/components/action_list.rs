use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::action::Action;
use crate::config::Theme;
use crate::dispatch::{ActionId, Platform};

/// Generation buttons of one platform panel
#[derive(Debug, Clone)]
pub struct ActionList {
    actions: Vec<ActionId>,
    selected: usize,
}

impl ActionList {
    pub fn new(platform: Platform) -> Self {
        Self {
            actions: ActionId::for_platform(platform).collect(),
            selected: 0,
        }
    }

    pub fn selected(&self) -> Option<ActionId> {
        self.actions.get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        if !self.actions.is_empty() {
            self.selected = (self.selected + 1) % self.actions.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.actions.is_empty() {
            self.selected = (self.selected + self.actions.len() - 1) % self.actions.len();
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => {
                self.select_prev();
                Some(Action::None)
            }
            (KeyModifiers::NONE, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => {
                self.select_next();
                Some(Action::None)
            }
            (KeyModifiers::NONE, KeyCode::Enter) | (KeyModifiers::NONE, KeyCode::Char(' ')) => {
                self.selected().map(Action::Generate)
            }
            (KeyModifiers::NONE, KeyCode::Char(c)) if c.is_ascii_digit() => {
                let idx = c.to_digit(10)? as usize;
                let action = self.actions.get(idx.checked_sub(1)?).copied()?;
                self.selected = idx - 1;
                Some(Action::Generate(action))
            }
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        let block = Block::default()
            .title(" Actions ")
            .title_style(theme.title_style(focused))
            .borders(Borders::ALL)
            .border_style(theme.border_style(focused));

        let lines: Vec<Line> = self
            .actions
            .iter()
            .enumerate()
            .map(|(i, action)| {
                let text = format!(" {}. {} ", i + 1, action.label());
                if i == self.selected && focused {
                    Line::from(Span::styled(text, theme.highlight_style()))
                } else if i == self.selected {
                    Line::from(Span::styled(text, theme.title_style(false)))
                } else {
                    Line::from(Span::raw(text))
                }
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_lists_only_platform_actions() {
        let list = ActionList::new(Platform::Email);
        assert!(!list.actions.is_empty());
        assert!(list.actions.iter().all(|a| a.platform() == Platform::Email));
    }

    #[test]
    fn test_enter_generates_selected() {
        let mut list = ActionList::new(Platform::Video);
        list.handle_key(key(KeyCode::Down));
        let expected = list.actions[1];
        assert_eq!(list.handle_key(key(KeyCode::Enter)), Some(Action::Generate(expected)));
    }

    #[test]
    fn test_selection_wraps() {
        let mut list = ActionList::new(Platform::Microblog);
        list.handle_key(key(KeyCode::Up));
        assert_eq!(list.selected(), list.actions.last().copied());
    }

    #[test]
    fn test_number_key_generates_and_selects() {
        let mut list = ActionList::new(Platform::Photo);
        let first = list.actions[0];
        assert_eq!(list.handle_key(key(KeyCode::Char('1'))), Some(Action::Generate(first)));
        assert_eq!(list.selected(), Some(first));

        assert_eq!(list.handle_key(key(KeyCode::Char('0'))), None);
        assert_eq!(list.handle_key(key(KeyCode::Char('9'))), None);
    }
}
