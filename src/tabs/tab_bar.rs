//! Tab Bar Widget
//!
//! Renders the platform tabs at the top of the screen with:
//! - Tab labels with Alt+N index indicators
//! - Active tab highlighting
//! - Activity indicators for background tabs
//! - In-flight request count on the right

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use super::{TabButton, TabController};
use crate::config::Theme;

/// Visual style configuration for the tab bar
#[derive(Debug, Clone)]
pub struct TabBarStyle {
    /// Background color of the entire tab bar
    pub background: Color,
    /// Style for inactive tabs
    pub inactive: Style,
    /// Style for the active tab
    pub active: Style,
    /// Style for tabs with activity
    pub activity: Style,
    /// Separator between tabs
    pub separator: &'static str,
    /// Activity indicator
    pub activity_icon: &'static str,
}

impl Default for TabBarStyle {
    fn default() -> Self {
        Self {
            background: Color::Rgb(30, 30, 46), // Dark background
            inactive: Style::default()
                .fg(Color::Rgb(147, 153, 178)) // Muted text
                .bg(Color::Rgb(30, 30, 46)),
            active: Style::default()
                .fg(Color::Rgb(205, 214, 244)) // Bright text
                .bg(Color::Rgb(69, 71, 90)) // Slightly lighter bg
                .add_modifier(Modifier::BOLD),
            activity: Style::default()
                .fg(Color::Rgb(249, 226, 175)) // Yellow/gold for activity
                .add_modifier(Modifier::BOLD),
            separator: "│",
            activity_icon: "●",
        }
    }
}

impl TabBarStyle {
    /// Create TabBarStyle from Theme configuration
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            background: theme.colors.background.to_color(),
            inactive: Style::default()
                .fg(theme.colors.muted.to_color())
                .bg(theme.colors.background.to_color()),
            active: Style::default()
                .fg(theme.colors.foreground.to_color())
                .bg(theme.focus.focused_border.to_color())
                .add_modifier(Modifier::BOLD),
            activity: Style::default()
                .fg(theme.colors.warning.to_color())
                .add_modifier(Modifier::BOLD),
            ..Self::default()
        }
    }
}

/// Tab bar widget that renders all platform tabs
pub struct TabBar<'a> {
    buttons: &'a [TabButton],
    style: TabBarStyle,
    in_flight: usize,
}

impl<'a> TabBar<'a> {
    pub fn from_controller(controller: &'a TabController) -> Self {
        Self {
            buttons: controller.buttons(),
            style: TabBarStyle::default(),
            in_flight: 0,
        }
    }

    pub fn from_controller_themed(controller: &'a TabController, theme: &Theme) -> Self {
        Self {
            style: TabBarStyle::from_theme(theme),
            ..Self::from_controller(controller)
        }
    }

    /// Number of dispatches awaiting a response, shown on the right
    pub fn in_flight(mut self, count: usize) -> Self {
        self.in_flight = count;
        self
    }

    fn build_tab_spans(&self, button: &TabButton, index: usize) -> Vec<Span<'a>> {
        let base_style = if button.is_active() {
            self.style.active
        } else {
            self.style.inactive
        };

        let mut spans = vec![Span::styled(" ", base_style)];

        // Alt+N selects tab N
        spans.push(Span::styled(
            format!("{}:", index + 1),
            base_style.add_modifier(Modifier::DIM),
        ));

        spans.push(Span::styled(button.label().to_string(), base_style));

        if !button.is_active() && button.has_activity() {
            spans.push(Span::styled(
                format!(" {}", self.style.activity_icon),
                self.style.activity,
            ));
        }

        spans.push(Span::styled(" ", base_style));
        spans
    }

    /// Click position to tab index mapping: (start_x, end_x, index)
    pub fn calculate_hit_areas(&self, area: Rect) -> Vec<(u16, u16, usize)> {
        let mut hit_areas = Vec::new();
        let mut x = area.x;

        for (index, button) in self.buttons.iter().enumerate() {
            let width: usize = self
                .build_tab_spans(button, index)
                .iter()
                .map(|s| s.content.chars().count())
                .sum();
            let width = width as u16;
            hit_areas.push((x, x + width, index));
            x += width + 1; // separator
        }

        hit_areas
    }
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        for x in area.x..area.x + area.width {
            buf[(x, area.y)].set_char(' ').set_bg(self.style.background);
        }

        let mut spans: Vec<Span> = Vec::new();
        for (index, button) in self.buttons.iter().enumerate() {
            if index > 0 {
                spans.push(Span::styled(
                    self.style.separator.to_string(),
                    Style::default()
                        .fg(Color::Rgb(69, 71, 90))
                        .bg(self.style.background),
                ));
            }
            spans.extend(self.build_tab_spans(button, index));
        }

        if self.in_flight > 0 {
            let tabs_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
            let pending = format!(" ⟳ {} pending ", self.in_flight);
            let pending_width = pending.chars().count();
            let available = area.width as usize;

            if tabs_width + pending_width + 2 < available {
                let padding = available.saturating_sub(tabs_width + pending_width);
                spans.push(Span::styled(
                    " ".repeat(padding),
                    Style::default().bg(self.style.background),
                ));
                spans.push(Span::styled(pending, self.style.activity.bg(self.style.background)));
            }
        }

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
