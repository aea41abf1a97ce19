//! HTTP transport to the generation service

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};
use thiserror::Error;

/// Any failure between sending a request and holding a parsed JSON object.
///
/// Network errors, non-success statuses and unparsable bodies all land here
/// and are handled identically by the caller; `message` is diagnostic only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("transport error: {message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Issues a request and returns the parsed response object
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        path: &str,
        payload: &Map<String, Value>,
    ) -> Result<Map<String, Value>, TransportError>;
}

/// JSON-over-HTTP transport rooted at a single base URL
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    http_client: Client,
}

impl HttpTransport {
    /// `base_url` is an origin such as `http://127.0.0.1:8000`; a trailing
    /// slash is dropped so that joining with `/youtube/...` stays clean.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http_client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http_client }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        path: &str,
        payload: &Map<String, Value>,
    ) -> Result<Map<String, Value>, TransportError> {
        let url = self.endpoint(path);
        tracing::debug!(%url, "sending generation request");

        let response = self
            .http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| TransportError::new(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(TransportError::new(format!("{} returned {}: {}", url, status, text)));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| TransportError::new(format!("invalid JSON from {}: {}", url, e)))?;

        match body {
            Value::Object(map) => Ok(map),
            other => Err(TransportError::new(format!(
                "expected a JSON object from {}, got {}",
                url,
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test payloads are objects"),
        }
    }

    #[test]
    fn test_endpoint_join_handles_slashes() {
        let transport = HttpTransport::new("http://127.0.0.1:8000/");
        assert_eq!(
            transport.endpoint("/x/generate-tweet"),
            "http://127.0.0.1:8000/x/generate-tweet"
        );
    }

    #[tokio::test]
    async fn test_posts_json_body_and_returns_object() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/youtube/generate-script"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "topic": "cats", "style": "informative" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "script": "Meow." })))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri());
        let body = payload(json!({ "topic": "cats", "style": "informative" }));
        let response = transport.send("/youtube/generate-script", &body).await.unwrap();

        assert_eq!(response.get("script"), Some(&json!("Meow.")));
    }

    #[tokio::test]
    async fn test_server_error_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/x/generate-tweet"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "boom" })))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri());
        let err = transport
            .send("/x/generate-tweet", &payload(json!({ "topic": "t" })))
            .await
            .unwrap_err();

        assert!(err.message.contains("500"), "{}", err);
    }

    #[tokio::test]
    async fn test_client_error_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(422))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri());
        let result = transport.send("/email/generate-email", &Map::new()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_invalid_json_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri());
        let err = transport.send("/youtube/suggest-niche", &Map::new()).await.unwrap_err();
        assert!(err.message.starts_with("invalid JSON"), "{}", err);
    }

    #[tokio::test]
    async fn test_non_object_json_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["a", "b"])))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri());
        let err = transport.send("/instagram/generate-reel-ideas", &Map::new()).await.unwrap_err();
        assert!(err.message.contains("an array"), "{}", err);
    }

    #[tokio::test]
    async fn test_refused_connection_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let transport = HttpTransport::new(format!("http://127.0.0.1:{}", port));
        let result = transport.send("/youtube/generate-script", &Map::new()).await;
        assert!(result.is_err());
    }
}
