//! Platform tabs
//!
//! One panel and one tab button per platform. Exactly one pair is active at
//! a time; switching is a pure visibility toggle and never touches dispatch
//! state.

mod tab_bar;

pub use tab_bar::TabBar;

use crate::dispatch::Platform;

/// A platform's content panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabPanel {
    platform: Platform,
    active: bool,
}

/// A button in the tab bar; `target` names the panel it shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabButton {
    target: Platform,
    active: bool,
    /// Output arrived while this tab was in the background
    has_activity: bool,
}

impl TabButton {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn has_activity(&self) -> bool {
        self.has_activity
    }

    pub fn label(&self) -> &'static str {
        self.target.label()
    }
}

/// Exclusive selection of the visible platform panel
#[derive(Debug, Clone)]
pub struct TabController {
    panels: Vec<TabPanel>,
    buttons: Vec<TabButton>,
}

impl Default for TabController {
    fn default() -> Self {
        Self::new(Platform::default())
    }
}

impl TabController {
    /// All platforms in tab order, with `initial` marked active
    pub fn new(initial: Platform) -> Self {
        let panels = Platform::ALL
            .iter()
            .map(|&platform| TabPanel { platform, active: platform == initial })
            .collect();
        let buttons = Platform::ALL
            .iter()
            .map(|&target| TabButton { target, active: target == initial, has_activity: false })
            .collect();
        Self { panels, buttons }
    }

    /// Show `platform`'s panel: clear every active marker, then mark the
    /// matching panel and button
    pub fn activate(&mut self, platform: Platform) {
        for panel in &mut self.panels {
            panel.active = false;
        }
        for button in &mut self.buttons {
            button.active = false;
        }

        if let Some(panel) = self.panels.iter_mut().find(|p| p.platform == platform) {
            panel.active = true;
        }
        if let Some(button) = self.buttons.iter_mut().find(|b| b.target == platform) {
            button.active = true;
            button.has_activity = false;
        }
    }

    pub fn buttons(&self) -> &[TabButton] {
        &self.buttons
    }

    /// Platform of the visible panel
    pub fn active(&self) -> Platform {
        self.panels
            .iter()
            .find(|p| p.active)
            .map(|p| p.platform)
            .unwrap_or_default()
    }

    pub fn active_index(&self) -> usize {
        self.panels.iter().position(|p| p.active).unwrap_or(0)
    }

    /// Switch to the tab at `index` (0-based); out of range is ignored
    pub fn select(&mut self, index: usize) {
        if let Some(platform) = self.panels.get(index).map(|p| p.platform) {
            self.activate(platform);
        }
    }

    /// Switch to next tab (wraps around)
    pub fn next_tab(&mut self) {
        let index = (self.active_index() + 1) % self.panels.len();
        self.select(index);
    }

    /// Switch to previous tab (wraps around)
    pub fn prev_tab(&mut self) {
        let index = match self.active_index() {
            0 => self.panels.len() - 1,
            i => i - 1,
        };
        self.select(index);
    }

    /// Flag a background tab whose output changed
    pub fn mark_activity(&mut self, platform: Platform) {
        if let Some(button) = self.buttons.iter_mut().find(|b| b.target == platform && !b.active) {
            button.has_activity = true;
        }
    }
}
