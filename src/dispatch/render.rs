//! Response rendering into output areas

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::{Map, Value};
use tokio::sync::mpsc;

use super::table::{ActionConfig, ActionId};
use super::transport::TransportError;

/// Whether the rendered text came from the service or is the fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    Success,
    Failed,
}

/// Text written into an output area by one dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutput {
    pub action: ActionId,
    pub output_area: String,
    pub text: String,
    pub status: RenderStatus,
}

/// Destination for rendered text; the last write to an area wins
pub trait OutputSink: Send + Sync {
    fn write(&self, output: RenderedOutput);
}

/// Write the outcome of a dispatch into `config.output_area`.
///
/// On success the value of `config.response_field` is written as plain text.
/// A missing or `null` field renders as empty text and is logged; other
/// non-string values render as their JSON text. On failure the action's
/// fixed error text is written and the cause is logged.
pub fn render(
    outcome: Result<Map<String, Value>, TransportError>,
    config: &ActionConfig,
    sink: &dyn OutputSink,
) {
    let (text, status) = match outcome {
        Ok(body) => (extract_text(&body, config), RenderStatus::Success),
        Err(err) => {
            tracing::error!(action = %config.action, error = %err, "generation request failed");
            (config.error_text.to_string(), RenderStatus::Failed)
        }
    };

    sink.write(RenderedOutput {
        action: config.action,
        output_area: config.output_area.clone(),
        text,
        status,
    });
}

fn extract_text(body: &Map<String, Value>, config: &ActionConfig) -> String {
    match body.get(config.response_field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => {
            tracing::warn!(
                action = %config.action,
                field = config.response_field,
                "response is missing the expected field"
            );
            String::new()
        }
        Some(other) => other.to_string(),
    }
}

/// Output areas held in memory; used by the headless runner and tests
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    inner: Arc<Mutex<MemorySinkState>>,
}

#[derive(Debug, Default)]
struct MemorySinkState {
    areas: HashMap<String, RenderedOutput>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last output written to an area, if any
    pub fn get(&self, output_area: &str) -> Option<RenderedOutput> {
        self.lock().areas.get(output_area).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemorySinkState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl OutputSink for MemorySink {
    fn write(&self, output: RenderedOutput) {
        self.lock().areas.insert(output.output_area.clone(), output);
    }
}

/// Forwards rendered output to the UI event loop
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<RenderedOutput>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<RenderedOutput>) -> Self {
        Self { tx }
    }
}

impl OutputSink for ChannelSink {
    fn write(&self, output: RenderedOutput) {
        if self.tx.send(output).is_err() {
            tracing::debug!("output channel closed, dropping rendered output");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::table::ActionTable;
    use serde_json::json;

    fn config(action: ActionId) -> ActionConfig {
        ActionTable::standard().get(action).cloned().unwrap()
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test bodies are objects"),
        }
    }

    #[test]
    fn test_success_writes_response_field() {
        let sink = MemorySink::new();
        let config = config(ActionId::XGenerateTweet);

        render(Ok(object(json!({ "tweet": "hello world", "extra": 1 }))), &config, &sink);

        let out = sink.get("xOutput").unwrap();
        assert_eq!(out.text, "hello world");
        assert_eq!(out.status, RenderStatus::Success);
        assert_eq!(out.action, ActionId::XGenerateTweet);
    }

    #[test]
    fn test_failure_writes_error_text() {
        let sink = MemorySink::new();
        let config = config(ActionId::InstagramGenerateStory);

        render(Err(TransportError::new("connection refused")), &config, &sink);

        let out = sink.get("instagramOutput").unwrap();
        assert_eq!(out.text, "Error generating Instagram story content.");
        assert_eq!(out.status, RenderStatus::Failed);
    }

    #[test]
    fn test_missing_field_renders_empty() {
        let sink = MemorySink::new();
        let config = config(ActionId::YoutubeGenerateScript);

        render(Ok(object(json!({ "detail": "no script here" }))), &config, &sink);

        assert_eq!(sink.get("youtubeOutput").map(|o| o.text).as_deref(), Some(""));
    }

    #[test]
    fn test_non_string_field_renders_json_text() {
        let sink = MemorySink::new();
        let config = config(ActionId::InstagramGenerateReelIdeas);

        render(Ok(object(json!({ "reel_ideas": ["a", "b"] }))), &config, &sink);

        assert_eq!(sink.get("instagramOutput").map(|o| o.text).as_deref(), Some(r#"["a","b"]"#));
    }

    #[test]
    fn test_later_write_overwrites_area() {
        let sink = MemorySink::new();
        let config = config(ActionId::EmailGenerateEmail);

        render(Ok(object(json!({ "email_content": "first" }))), &config, &sink);
        render(Ok(object(json!({ "email_content": "second" }))), &config, &sink);

        assert_eq!(sink.get("emailOutput").map(|o| o.text).as_deref(), Some("second"));
    }

    #[test]
    fn test_channel_sink_forwards() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sink = ChannelSink::new(tx);
        let config = config(ActionId::YoutubeSuggestNiche);

        render(Ok(object(json!({ "niche_suggestions": "retro gaming" }))), &config, &sink);

        let out = rx.try_recv().unwrap();
        assert_eq!(out.output_area, "youtubeOutput");
        assert_eq!(out.text, "retro gaming");
    }
}
