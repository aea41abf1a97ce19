// Event handlers and action dispatch

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::action::Action;
use crate::dispatch::ActionId;
use crate::input::focus::FocusArea;
use crate::tabs::TabBar;

use super::ui_state::UiState;
use super::App;

const PAGE_SCROLL: u16 = 10;
const WHEEL_SCROLL: u16 = 3;

impl UiState {
    pub(super) fn handle_event(&mut self, event: &CrosstermEvent) -> Option<Action> {
        match event {
            CrosstermEvent::Key(key) => self.handle_key(*key),
            CrosstermEvent::Mouse(mouse) => self.handle_mouse(*mouse),
            CrosstermEvent::Paste(text) => self.handle_paste(text),
            CrosstermEvent::Resize(..) => Some(Action::None),
            _ => None,
        }
    }

    /// Pasted text lands in the selected field of the visible form
    pub(super) fn handle_paste(&mut self, text: &str) -> Option<Action> {
        if !self.focus.is_focused(FocusArea::Form) {
            return None;
        }
        let platform = self.active();
        self.forms.get_mut(platform).paste_text(text);
        Some(Action::None)
    }

    pub(super) fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        #[cfg(debug_assertions)]
        tracing::debug!("Key event: {:?}, focus: {:?}", key, self.focus.current());

        // Global keys first
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Some(Action::Quit),
            (KeyModifiers::NONE, KeyCode::Tab) => return Some(Action::NextTab),
            (_, KeyCode::BackTab) => return Some(Action::PrevTab),
            (KeyModifiers::ALT, KeyCode::Char(c @ '1'..='9')) => {
                return Some(Action::SelectTab(c as usize - '1' as usize));
            }
            (KeyModifiers::CONTROL, KeyCode::Char('n')) => return Some(Action::FocusNext),
            (KeyModifiers::CONTROL, KeyCode::Char('p')) => return Some(Action::FocusPrev),
            (KeyModifiers::CONTROL, KeyCode::Char('y')) => return Some(Action::CopyOutput),
            (KeyModifiers::CONTROL, KeyCode::Char('l')) => return Some(Action::ClearOutput),
            (_, KeyCode::PageUp) => return Some(Action::ScrollUp(PAGE_SCROLL)),
            (_, KeyCode::PageDown) => return Some(Action::ScrollDown(PAGE_SCROLL)),
            _ => {}
        }

        let platform = self.active();
        match self.focus.current() {
            FocusArea::Form => {
                if key.code == KeyCode::Enter {
                    return self.action_list(platform).selected().map(Action::Generate);
                }
                if self.forms.get_mut(platform).handle_key(key) {
                    Some(Action::None)
                } else {
                    None
                }
            }
            FocusArea::Actions => self.action_list_mut(platform).handle_key(key),
            FocusArea::Output => match key.code {
                KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp(1)),
                KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollDown(1)),
                _ => None,
            },
        }
    }

    pub(super) fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<Action> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let area = self.tab_bar_area;
                if mouse.row != area.y || area.height == 0 {
                    return None;
                }
                TabBar::from_controller(&self.tabs)
                    .calculate_hit_areas(area)
                    .into_iter()
                    .find(|(start, end, _)| mouse.column >= *start && mouse.column < *end)
                    .map(|(_, _, index)| Action::SelectTab(index))
            }
            MouseEventKind::ScrollUp => Some(Action::ScrollUp(WHEEL_SCROLL)),
            MouseEventKind::ScrollDown => Some(Action::ScrollDown(WHEEL_SCROLL)),
            _ => None,
        }
    }

    /// Apply an action that only touches UI state
    pub(super) fn apply(&mut self, action: &Action) {
        let platform = self.active();
        match action {
            Action::None | Action::Generate(_) | Action::CopyOutput => {}
            Action::Quit => self.should_quit = true,
            Action::Tick => self.expire_status(Instant::now()),
            Action::FocusNext => self.focus.next(),
            Action::FocusPrev => self.focus.prev(),
            Action::NextTab => self.tabs.next_tab(),
            Action::PrevTab => self.tabs.prev_tab(),
            Action::SelectTab(index) => self.tabs.select(*index),
            Action::ScrollUp(amount) => self.outputs.get_mut(platform).scroll_up(*amount),
            Action::ScrollDown(amount) => self.outputs.get_mut(platform).scroll_down(*amount),
            Action::ClearOutput => self.outputs.get_mut(platform).clear(),
        }
        if !matches!(action, Action::Tick) {
            self.mark_dirty();
        }
    }
}

impl App {
    pub(super) fn dispatch(&mut self, action: Action) {
        match action {
            Action::Generate(id) => self.generate(id),
            Action::CopyOutput => self.copy_output(),
            other => self.ui.apply(&other),
        }
    }

    /// Read the form now and send the request on a background task
    fn generate(&mut self, id: ActionId) {
        self.ui.outputs.begin(id.platform());
        self.registry
            .spawn_dispatch(id, &self.ui.forms, Arc::clone(&self.sink));
        self.ui.mark_dirty();
    }

    fn copy_output(&mut self) {
        let platform = self.ui.active();
        let text = self.ui.outputs.get(platform).text().to_string();
        if text.is_empty() {
            self.ui.set_status("Nothing to copy");
            return;
        }

        let Some(clipboard) = self.clipboard.as_mut() else {
            self.ui.set_status("Clipboard unavailable");
            return;
        };

        match clipboard.set_text(text) {
            Ok(()) => self.ui.set_status(format!("Copied {} output", platform.label())),
            Err(e) => {
                tracing::warn!("Clipboard write failed: {}", e);
                self.ui.set_status("Copy failed");
            }
        }
    }
}
