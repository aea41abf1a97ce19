// App module - split into submodules
// - mod.rs: App struct, constructor, terminal restore
// - ui_state.rs: UI state independent of the terminal
// - event_loop.rs: Main run() loop
// - rendering.rs: All UI drawing
// - handlers.rs: Event handlers and action dispatch

mod event_loop;
mod handlers;
mod rendering;
mod ui_state;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use arboard::Clipboard;
use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::config::{ConfigManager, Theme};
use crate::dispatch::{ActionRegistry, ChannelSink, OutputSink, RenderedOutput};
use crate::error::{Result, YoovaError};

pub use ui_state::UiState;

pub struct App {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    ui: UiState,
    theme: Theme,
    base_url: String,
    tick_interval: Duration,
    registry: Arc<ActionRegistry>,
    /// Handed to every spawned dispatch; results come back on `output_rx`
    sink: Arc<dyn OutputSink>,
    output_rx: Option<mpsc::UnboundedReceiver<RenderedOutput>>,
    clipboard: Option<Clipboard>,
}

impl App {
    pub fn new(config: &ConfigManager, registry: Arc<ActionRegistry>) -> Result<Self> {
        enable_raw_mode().map_err(|e| YoovaError::Terminal(e.to_string()))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)
            .map_err(|e| YoovaError::Terminal(e.to_string()))?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).map_err(|e| YoovaError::Terminal(e.to_string()))?;

        let clipboard = match Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                tracing::warn!("Clipboard unavailable: {}", e);
                None
            }
        };

        let (output_tx, output_rx) = mpsc::unbounded_channel();
        let general = &config.app_config().general;

        Ok(Self {
            terminal,
            ui: UiState::new(general.initial_platform),
            theme: config.theme().clone(),
            base_url: config.app_config().api.base_url.clone(),
            tick_interval: Duration::from_millis(general.tick_interval_ms.max(16)),
            registry,
            sink: Arc::new(ChannelSink::new(output_tx)),
            output_rx: Some(output_rx),
            clipboard,
        })
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        );
    }
}
