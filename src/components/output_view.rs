use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::config::Theme;
use crate::dispatch::{ActionId, Platform, RenderStatus, RenderedOutput};

/// Contents of one platform's output area
#[derive(Debug, Clone, Default)]
pub struct OutputPanel {
    text: String,
    status: Option<RenderStatus>,
    last_action: Option<ActionId>,
    updated_at: Option<DateTime<Local>>,
    /// Dispatches started for this area that have not written yet
    pending: usize,
    scroll_offset: u16,
    /// Inner size (width, height) from the last draw, bounds scrolling
    viewport: (u16, u16),
}

impl OutputPanel {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Record the area the panel is drawn into
    pub fn set_viewport(&mut self, area: Rect) {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        self.viewport = (inner.width, inner.height);
    }

    /// Rows the text occupies once wrapped to the viewport width
    fn wrapped_rows(&self) -> usize {
        match self.viewport.0 {
            0 => self.text.lines().count(),
            width => Paragraph::new(self.text.as_str())
                .wrap(Wrap { trim: false })
                .line_count(width),
        }
    }

    pub fn scroll_up(&mut self, amount: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    pub fn scroll_down(&mut self, amount: u16) {
        let visible = usize::from(self.viewport.1.max(1));
        let max = self.wrapped_rows().saturating_sub(visible).min(usize::from(u16::MAX)) as u16;
        self.scroll_offset = self.scroll_offset.saturating_add(amount).min(max);
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.status = None;
        self.last_action = None;
        self.updated_at = None;
        self.scroll_offset = 0;
    }

    /// Replace the contents; whichever dispatch writes last is what shows
    fn apply(&mut self, output: RenderedOutput) {
        self.text = output.text;
        self.status = Some(output.status);
        self.last_action = Some(output.action);
        self.updated_at = Some(Local::now());
        self.scroll_offset = 0;
        self.pending = self.pending.saturating_sub(1);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        let mut title = String::from(" Output ");
        if let Some(action) = self.last_action {
            title = format!(" Output: {} ", action.label());
        }

        let mut footer = Vec::new();
        if self.pending > 0 {
            footer.push(Span::styled(
                format!(" ⟳ {} pending ", self.pending),
                theme.title_style(false).add_modifier(Modifier::ITALIC),
            ));
        }
        if let Some(at) = self.updated_at {
            footer.push(Span::styled(format!(" updated {} ", at.format("%H:%M:%S")), theme.muted_style()));
        }

        let block = Block::default()
            .title(title)
            .title_style(theme.title_style(focused))
            .title_bottom(Line::from(footer).right_aligned())
            .borders(Borders::ALL)
            .border_style(theme.border_style(focused));

        if self.text.is_empty() && self.status.is_none() {
            let hint = Paragraph::new(Line::from(Span::styled(
                "Fill in the inputs and pick an action",
                theme.muted_style().add_modifier(Modifier::ITALIC),
            )))
            .block(block);
            frame.render_widget(hint, area);
            return;
        }

        let failed = self.status == Some(RenderStatus::Failed);
        let paragraph = Paragraph::new(self.text.as_str())
            .style(theme.output_style(failed))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset, 0));

        frame.render_widget(paragraph, area);
    }
}

/// One output area per platform
#[derive(Debug, Clone, Default)]
pub struct OutputAreas {
    panels: [OutputPanel; 4],
}

impl OutputAreas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, platform: Platform) -> &OutputPanel {
        &self.panels[platform.index()]
    }

    pub fn get_mut(&mut self, platform: Platform) -> &mut OutputPanel {
        &mut self.panels[platform.index()]
    }

    /// Record that a dispatch targeting `platform`'s area has started
    pub fn begin(&mut self, platform: Platform) {
        self.get_mut(platform).pending += 1;
    }

    /// Total dispatches still in flight across all areas
    pub fn in_flight(&self) -> usize {
        self.panels.iter().map(|p| p.pending).sum()
    }

    /// Route a rendered result to the area it names.
    /// Returns the platform written to, or None for an unknown area.
    pub fn apply(&mut self, output: RenderedOutput) -> Option<Platform> {
        let platform = Platform::ALL
            .into_iter()
            .find(|p| p.output_area() == output.output_area);

        match platform {
            Some(platform) => {
                self.get_mut(platform).apply(output);
                Some(platform)
            }
            None => {
                tracing::warn!(area = %output.output_area, "result for unknown output area dropped");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(action: ActionId, text: &str, status: RenderStatus) -> RenderedOutput {
        RenderedOutput {
            action,
            output_area: action.platform().output_area(),
            text: text.to_string(),
            status,
        }
    }

    #[test]
    fn test_apply_routes_to_platform() {
        let mut areas = OutputAreas::new();
        let written = areas.apply(output(ActionId::XGenerateTweet, "hello", RenderStatus::Success));

        assert_eq!(written, Some(Platform::Microblog));
        assert_eq!(areas.get(Platform::Microblog).text(), "hello");
        assert_eq!(areas.get(Platform::Video).text(), "");
        assert!(areas.get(Platform::Microblog).updated_at.is_some());
    }

    #[test]
    fn test_last_write_wins_and_pending_drains() {
        let mut areas = OutputAreas::new();
        areas.begin(Platform::Video);
        areas.begin(Platform::Video);
        assert_eq!(areas.in_flight(), 2);

        areas.apply(output(ActionId::YoutubeSuggestNiche, "first", RenderStatus::Success));
        areas.apply(output(ActionId::YoutubeGenerateScript, "Error generating script.", RenderStatus::Failed));

        let panel = areas.get(Platform::Video);
        assert_eq!(panel.text(), "Error generating script.");
        assert_eq!(panel.status, Some(RenderStatus::Failed));
        assert_eq!(panel.last_action, Some(ActionId::YoutubeGenerateScript));
        assert_eq!(areas.in_flight(), 0);
    }

    #[test]
    fn test_unknown_area_is_dropped() {
        let mut areas = OutputAreas::new();
        let mut stray = output(ActionId::EmailGenerateEmail, "x", RenderStatus::Success);
        stray.output_area = "tiktokOutput".to_string();
        assert_eq!(areas.apply(stray), None);
        assert_eq!(areas.get(Platform::Email).text(), "");
    }

    #[test]
    fn test_scroll_is_bounded_by_text() {
        let mut areas = OutputAreas::new();
        areas.apply(output(ActionId::EmailGenerateEmail, "a\nb\nc", RenderStatus::Success));
        let panel = areas.get_mut(Platform::Email);
        panel.scroll_down(10);
        assert_eq!(panel.scroll_offset, 2);
        panel.scroll_up(1);
        assert_eq!(panel.scroll_offset, 1);
    }

    #[test]
    fn test_scroll_counts_wrapped_rows() {
        let mut areas = OutputAreas::new();
        let script = "word ".repeat(2000);
        areas.apply(output(ActionId::YoutubeGenerateScript, &script, RenderStatus::Success));
        let panel = areas.get_mut(Platform::Video);
        // 40 columns by 5 rows inside the border
        panel.set_viewport(Rect::new(0, 0, 42, 7));

        panel.scroll_down(10);
        assert_eq!(panel.scroll_offset, 10);

        panel.scroll_down(u16::MAX);
        let max = panel.scroll_offset;
        assert!(max > 200, "wrapped text should scroll far, got {}", max);
        assert!(max < 2000);
        panel.scroll_down(1);
        assert_eq!(panel.scroll_offset, max);
    }
}
