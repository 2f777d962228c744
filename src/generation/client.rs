//! Generative text API client.
//!
//! [`TextGenerator`] is the only capability the generator needs: send a
//! prompt, get text back. [`AnthropicClient`] implements it against the
//! Anthropic Messages API with [`reqwest`].

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::GenerationError;
use crate::config::GenerationConfig;

/// API version header value sent with every request.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Accepts a text prompt and returns generated text.
///
/// Implementations make exactly one attempt per call.
#[async_trait]
pub trait TextGenerator: Send + Sync + fmt::Debug {
    /// Sends `prompt` and returns the reply text.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Transport`] on network failure, timeout,
    /// or a non-success status.
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// HTTP client for the Anthropic Messages API.
pub struct AnthropicClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl fmt::Debug for AnthropicClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnthropicClient")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [UserMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicClient {
    /// Builds a client whose every request is bounded by
    /// `config.request_timeout`.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`reqwest::Error`] if the HTTP client cannot
    /// be constructed (e.g. TLS backend initialisation failure).
    pub fn new(config: &GenerationConfig, api_key: String) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.api_url)
    }
}

#[async_trait]
impl TextGenerator for AnthropicClient {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: [UserMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GenerationError::Transport {
                status: Some(status.as_u16()),
                message: format!("API returned {status}: {body}"),
            });
        }

        let parsed: MessagesResponse = response.json().await.map_err(transport_error)?;
        parsed
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .ok_or_else(|| GenerationError::Transport {
                status: Some(status.as_u16()),
                message: "response contained no text content".to_string(),
            })
    }
}

fn transport_error(e: reqwest::Error) -> GenerationError {
    let message = if e.is_timeout() {
        "request to generation API timed out".to_string()
    } else {
        e.to_string()
    };
    GenerationError::Transport {
        status: e.status().map(|s| s.as_u16()),
        message,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::time::Duration;

    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{Value, json};

    use super::*;

    async fn spawn_mock(router: Router) -> String {
        let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
            panic!("bind mock server");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("mock server address");
        };
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        format!("http://{addr}")
    }

    fn config(api_url: String, timeout: Duration) -> GenerationConfig {
        GenerationConfig {
            api_key: None,
            api_url,
            model: "test-model".to_string(),
            max_tokens: 2000,
            request_timeout: timeout,
        }
    }

    #[tokio::test]
    async fn returns_first_text_block() {
        let router = Router::new().route(
            "/v1/messages",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(
                    headers.get("x-api-key").and_then(|v| v.to_str().ok()),
                    Some("secret")
                );
                assert_eq!(
                    headers.get("anthropic-version").and_then(|v| v.to_str().ok()),
                    Some(ANTHROPIC_VERSION)
                );
                assert_eq!(body["model"], "test-model");
                assert_eq!(body["max_tokens"], 2000);
                assert_eq!(body["messages"][0]["role"], "user");
                assert_eq!(body["messages"][0]["content"], "hello");
                Json(json!({
                    "content": [{"type": "text", "text": "[1, 2, 3]"}]
                }))
            }),
        );
        let url = spawn_mock(router).await;
        let Ok(client) = AnthropicClient::new(&config(url, Duration::from_secs(5)), "secret".into())
        else {
            panic!("client should build");
        };

        let reply = client.complete("hello").await;
        let Ok(reply) = reply else {
            panic!("expected reply, got {reply:?}");
        };
        assert_eq!(reply, "[1, 2, 3]");
    }

    #[tokio::test]
    async fn non_success_status_is_transport_error() {
        let router = Router::new().route(
            "/v1/messages",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "overloaded") }),
        );
        let url = spawn_mock(router).await;
        let Ok(client) = AnthropicClient::new(&config(url, Duration::from_secs(5)), "k".into())
        else {
            panic!("client should build");
        };

        match client.complete("hello").await {
            Err(GenerationError::Transport { status, message }) => {
                assert_eq!(status, Some(503));
                assert!(message.contains("overloaded"));
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_api_times_out() {
        let router = Router::new().route(
            "/v1/messages",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!({"content": []}))
            }),
        );
        let url = spawn_mock(router).await;
        let Ok(client) =
            AnthropicClient::new(&config(url, Duration::from_millis(100)), "k".into())
        else {
            panic!("client should build");
        };

        match client.complete("hello").await {
            Err(GenerationError::Transport { status, message }) => {
                assert_eq!(status, None);
                assert!(message.contains("timed out"));
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_api_is_transport_error() {
        // Port 9 on loopback is not expected to accept connections.
        let Ok(client) = AnthropicClient::new(
            &config("http://127.0.0.1:9".to_string(), Duration::from_secs(2)),
            "k".into(),
        ) else {
            panic!("client should build");
        };
        assert!(matches!(
            client.complete("hello").await,
            Err(GenerationError::Transport { status: None, .. })
        ));
    }

    #[test]
    fn debug_output_hides_api_key() {
        let Ok(client) = AnthropicClient::new(
            &config("https://example.invalid/".to_string(), Duration::from_secs(1)),
            "super-secret".into(),
        ) else {
            panic!("client should build");
        };
        let debug = format!("{client:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("example.invalid"));
        assert_eq!(client.endpoint(), "https://example.invalid/v1/messages");
    }
}
