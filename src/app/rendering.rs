// Rendering - draw() method and UI layout helpers

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::ui_state::UiState;
use super::App;
use crate::config::Theme;
use crate::error::{Result, YoovaError};
use crate::input::focus::FocusArea;
use crate::tabs::TabBar;

const KEY_HINTS: &str = " Tab platform  ^N/^P focus  Enter generate  ^Y copy  Esc quit ";

impl App {
    pub(super) fn draw(&mut self) -> Result<()> {
        let ui = &mut self.ui;
        let theme = &self.theme;
        let base_url = self.base_url.as_str();
        self.terminal
            .draw(|frame| draw_ui(frame, ui, theme, base_url))
            .map_err(|e| YoovaError::Terminal(e.to_string()))?;
        Ok(())
    }
}

/// Tab bar on top, the active platform's panel in the middle, status line below
pub(super) fn draw_ui(frame: &mut Frame, ui: &mut UiState, theme: &Theme, base_url: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    ui.tab_bar_area = chunks[0];
    let tab_bar = TabBar::from_controller_themed(&ui.tabs, theme).in_flight(ui.outputs.in_flight());
    frame.render_widget(tab_bar, chunks[0]);

    draw_platform_panel(frame, chunks[1], ui, theme);
    draw_status_line(frame, chunks[2], ui, theme, base_url);
}

fn draw_platform_panel(frame: &mut Frame, area: Rect, ui: &mut UiState, theme: &Theme) {
    let platform = ui.active();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(columns[0]);

    ui.forms
        .get(platform)
        .render(frame, left[0], ui.focus.is_focused(FocusArea::Form), theme);
    ui.action_list(platform)
        .render(frame, left[1], ui.focus.is_focused(FocusArea::Actions), theme);
    ui.outputs.get_mut(platform).set_viewport(columns[1]);
    ui.outputs
        .get(platform)
        .render(frame, columns[1], ui.focus.is_focused(FocusArea::Output), theme);
}

fn draw_status_line(frame: &mut Frame, area: Rect, ui: &UiState, theme: &Theme, base_url: &str) {
    let left = match &ui.status {
        Some((message, _)) => Span::styled(format!(" {} ", message), theme.title_style(true)),
        None => Span::styled(KEY_HINTS, theme.muted_style()),
    };

    let right = format!(" {} ", base_url);
    let used = left.content.chars().count() + right.chars().count();
    let padding = (area.width as usize).saturating_sub(used);

    let line = Line::from(vec![
        left,
        Span::raw(" ".repeat(padding)),
        Span::styled(right, theme.muted_style()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{ActionId, Platform, RenderStatus, RenderedOutput};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn render(ui: &mut UiState) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|frame| draw_ui(frame, ui, &theme, "http://127.0.0.1:8000"))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn contents(buffer: &Buffer) -> String {
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_draw_shows_active_platform_panel() {
        let mut ui = UiState::new(Platform::Photo);
        let screen = contents(&render(&mut ui));

        assert!(screen.contains("Instagram inputs"));
        assert!(screen.contains("Generate Reel Ideas"));
        assert!(!screen.contains("Generate Tweet"));
        assert!(screen.contains("http://127.0.0.1:8000"));
        assert_eq!(ui.tab_bar_area, Rect::new(0, 0, 100, 1));
    }

    #[test]
    fn test_draw_shows_output_text() {
        let mut ui = UiState::new(Platform::Microblog);
        ui.receive_output(RenderedOutput {
            action: ActionId::XGenerateTweet,
            output_area: "xOutput".to_string(),
            text: "Shipping Rust today".to_string(),
            status: RenderStatus::Success,
        });
        let screen = contents(&render(&mut ui));

        assert!(screen.contains("Shipping Rust today"));
        assert!(screen.contains("Output: Generate Tweet"));
    }

    #[test]
    fn test_status_message_replaces_hints() {
        let mut ui = UiState::new(Platform::Video);
        ui.set_status("Copied YouTube output");
        let screen = contents(&render(&mut ui));

        assert!(screen.contains("Copied YouTube output"));
        assert!(!screen.contains("Enter generate"));
    }

    #[test]
    fn test_long_paragraph_scrolls_after_draw() {
        let mut ui = UiState::new(Platform::Video);
        let script: Vec<String> = (0..400).map(|i| format!("w{:03}", i)).collect();
        ui.receive_output(RenderedOutput {
            action: ActionId::YoutubeGenerateScript,
            output_area: "youtubeOutput".to_string(),
            text: script.join(" "),
            status: RenderStatus::Success,
        });
        assert!(contents(&render(&mut ui)).contains("w000"));

        ui.outputs.get_mut(Platform::Video).scroll_down(10);
        let screen = contents(&render(&mut ui));
        assert!(!screen.contains("w000"));
        assert!(screen.contains("w200"));
    }
}
