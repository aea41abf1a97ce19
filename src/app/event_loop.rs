// Event loop - main run() method

use crossterm::event::EventStream;
use futures::StreamExt;
use tokio::time::{self, MissedTickBehavior};

use super::App;
use crate::action::Action;
use crate::error::{Result, YoovaError};

impl App {
    /// Drive the UI until the user quits.
    ///
    /// Terminal input, finished dispatches and the tick timer are awaited
    /// together; the screen is redrawn once after whichever fires.
    pub async fn run(&mut self) -> Result<()> {
        let mut output_rx = self
            .output_rx
            .take()
            .ok_or_else(|| YoovaError::Terminal("event loop already running".to_string()))?;
        let mut events = EventStream::new();
        let mut tick = time::interval(self.tick_interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(base_url = %self.base_url, "ui started");

        loop {
            tokio::select! {
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(event)) => {
                        // Any user input implies we want to give UI feedback
                        self.ui.mark_dirty();
                        if let Some(action) = self.ui.handle_event(&event) {
                            self.dispatch(action);
                        }
                    }
                    Some(Err(e)) => return Err(YoovaError::Terminal(e.to_string())),
                    None => break,
                },
                Some(output) = output_rx.recv() => {
                    self.ui.receive_output(output);
                }
                _ = tick.tick() => {
                    self.dispatch(Action::Tick);
                }
            }

            if self.ui.should_quit {
                break;
            }

            if self.ui.needs_redraw {
                self.draw()?;
                self.ui.needs_redraw = false;
            }
        }

        tracing::info!(in_flight = self.ui.outputs.in_flight(), "ui stopped");
        Ok(())
    }
}
