// UiState - everything the UI shows, kept apart from the terminal so key
// handling and layout can be driven in tests

use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::components::{ActionList, Forms, OutputAreas};
use crate::dispatch::{Platform, RenderedOutput};
use crate::input::focus::FocusManager;
use crate::tabs::TabController;

/// How long a status-line message stays visible
pub(super) const STATUS_TTL: Duration = Duration::from_secs(3);

pub struct UiState {
    pub tabs: TabController,
    pub focus: FocusManager,
    pub forms: Forms,
    pub action_lists: Vec<ActionList>,
    pub outputs: OutputAreas,

    pub needs_redraw: bool,
    pub should_quit: bool,
    pub status: Option<(String, Instant)>,

    // Layout / hit testing areas
    pub tab_bar_area: Rect,
}

impl UiState {
    pub fn new(initial: Platform) -> Self {
        Self {
            tabs: TabController::new(initial),
            focus: FocusManager::new(),
            forms: Forms::new(),
            action_lists: Platform::ALL.iter().map(|&p| ActionList::new(p)).collect(),
            outputs: OutputAreas::new(),
            needs_redraw: true,
            should_quit: false,
            status: None,
            tab_bar_area: Rect::default(),
        }
    }

    #[inline]
    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Platform of the visible panel
    pub fn active(&self) -> Platform {
        self.tabs.active()
    }

    pub fn action_list(&self, platform: Platform) -> &ActionList {
        &self.action_lists[platform.index()]
    }

    pub fn action_list_mut(&mut self, platform: Platform) -> &mut ActionList {
        &mut self.action_lists[platform.index()]
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some((message.into(), Instant::now()));
        self.mark_dirty();
    }

    /// Drop the status message once it has been shown long enough
    pub fn expire_status(&mut self, now: Instant) {
        if let Some((_, at)) = &self.status {
            if now.duration_since(*at) >= STATUS_TTL {
                self.status = None;
                self.mark_dirty();
            }
        }
    }

    /// Write a finished dispatch into its output area
    pub fn receive_output(&mut self, output: RenderedOutput) {
        if let Some(platform) = self.outputs.apply(output) {
            self.tabs.mark_activity(platform);
        }
        self.mark_dirty();
    }
}
