/// LLM Client — the single point of entry for all Groq API calls in Neural Core.
///
/// ARCHITECTURAL RULE: No other module may call the provider API directly.
/// Handlers depend on the `CompletionProvider` trait; `LlmClient` is the only
/// production implementation.
///
/// Model, temperature and output cap are hardcoded — the persona prompt is tuned
/// against them.
use std::time::Duration;

use async_stream::stream;
use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod sse;

use sse::{parse_event, SseDecoder, StreamEvent};

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// The model used for every chat completion.
pub const MODEL: &str = "llama-3.3-70b-versatile";
pub const TEMPERATURE: f32 = 0.5;
pub const MAX_TOKENS: u32 = 250;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Upstream stream error: {0}")]
    Upstream(String),
}

/// One incremental piece of generated text. `content` is `None` for chunks that
/// only carry a role, usage, or finish reason.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatFragment {
    pub content: Option<String>,
}

/// Async sequence of fragments from the provider. An `Err` item ends the stream.
pub type FragmentStream = BoxStream<'static, Result<ChatFragment, LlmError>>;

/// Streaming completion backend. Carried in `AppState` as
/// `Option<Arc<dyn CompletionProvider>>` — `None` when no credential is configured.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Opens a streamed completion for a two-message conversation.
    ///
    /// Errors returned here happen before any fragment is produced; errors
    /// after that arrive as items of the stream.
    async fn stream_completion(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<FragmentStream, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Groq chat-completions client.
///
/// Only the connect phase is bounded; a slow stream stays open as long as the
/// provider keeps it open.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Self::with_endpoint(api_key, GROQ_API_URL.to_string())
    }

    /// Builds a client against an arbitrary OpenAI-compatible chat-completions URL.
    pub fn with_endpoint(api_key: String, endpoint: String) -> Result<Self, LlmError> {
        let client = Client::builder().connect_timeout(CONNECT_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key,
            endpoint,
        })
    }
}

#[async_trait]
impl CompletionProvider for LlmClient {
    async fn stream_completion(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<FragmentStream, LlmError> {
        let request_body = build_request(system_prompt, user_prompt);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("LLM API returned {}: {}", status, body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: extract_error_message(body),
            });
        }

        debug!("LLM stream opened (status {})", status);

        let mut bytes = response.bytes_stream().boxed();
        let fragments = stream! {
            let mut decoder = SseDecoder::default();
            'read: while let Some(chunk) = bytes.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        yield Err(LlmError::Http(e));
                        break 'read;
                    }
                };
                for data in decoder.push(&chunk) {
                    match parse_event(&data) {
                        Ok(StreamEvent::Fragment(fragment)) => {
                            yield Ok(fragment);
                        }
                        Ok(StreamEvent::Done) => break 'read,
                        Err(e) => {
                            yield Err(e);
                            break 'read;
                        }
                    }
                }
            }
        };

        Ok(fragments.boxed())
    }
}

fn build_request<'a>(system_prompt: &'a str, user_prompt: &'a str) -> ChatCompletionRequest<'a> {
    ChatCompletionRequest {
        model: MODEL,
        messages: vec![
            ChatMessage {
                role: "system",
                content: system_prompt,
            },
            ChatMessage {
                role: "user",
                content: user_prompt,
            },
        ],
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
        stream: true,
    }
}

/// Pulls `error.message` out of a provider error body, keeping the raw body otherwise.
fn extract_error_message(body: String) -> String {
    serde_json::from_str::<ApiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use axum::{
        http::{header, HeaderMap, StatusCode},
        response::IntoResponse,
        routing::post,
        Json, Router,
    };
    use serde_json::Value;

    use super::*;
    use crate::chat::relay::{answer_query, SETUP_ERROR_PREFIX};

    const TEST_KEY: &str = "gsk_test";

    const TWO_FRAGMENTS_THEN_DONE: &str = concat!(
        "data: {\"choices\":[{\"index\":0,\"delta\":{\"role\":\"assistant\"}}]}\n\n",
        "data: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\"Query \"}}]}\n\n",
        ": keep-alive\n\n",
        "data: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\"resolved.\"}}]}\n\n",
        "data: [DONE]\n\n",
        "data: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\"after done\"}}]}\n\n",
        "data: garbage\n\n",
    );

    const FRAGMENT_THEN_MALFORMED: &str = concat!(
        "data: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\"Deploying\"}}]}\n\n",
        "data: {not json\n\n",
        "data: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\"unreachable\"}}]}\n\n",
    );

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            == Some("Bearer gsk_test")
    }

    fn event_stream(
        headers: HeaderMap,
        body: Value,
        events: &'static str,
    ) -> axum::response::Response {
        if !authorized(&headers) || body["stream"] != true || body["model"] != MODEL {
            return (StatusCode::BAD_REQUEST, "unexpected request").into_response();
        }
        ([(header::CONTENT_TYPE, "text/event-stream")], events).into_response()
    }

    /// Serves a fake chat-completions API on an ephemeral port; returns its base URL.
    async fn spawn_upstream() -> String {
        let app = Router::new()
            .route(
                "/unauthorized",
                post(|| async {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(serde_json::json!({
                            "error": {"message": "Invalid API Key", "type": "invalid_request_error"}
                        })),
                    )
                }),
            )
            .route(
                "/two-fragments",
                post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                    event_stream(headers, body, TWO_FRAGMENTS_THEN_DONE)
                }),
            )
            .route(
                "/malformed",
                post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                    event_stream(headers, body, FRAGMENT_THEN_MALFORMED)
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// Client for the local server; bypasses any proxy configured in the environment.
    fn client_for(base: &str, path: &str) -> LlmClient {
        LlmClient {
            client: Client::builder().no_proxy().build().unwrap(),
            api_key: TEST_KEY.to_string(),
            endpoint: format!("{base}{path}"),
        }
    }

    #[tokio::test]
    async fn test_unauthorized_status_is_api_error_with_provider_message() {
        let base = spawn_upstream().await;
        let client = client_for(&base, "/unauthorized");

        match client.stream_completion("SYS", "hi").await {
            Err(LlmError::Api { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid API Key");
            }
            Err(other) => panic!("expected API error, got {other:?}"),
            Ok(_) => panic!("expected API error, got a stream"),
        }

        let reply: Vec<String> = answer_query(Some(&client), "hi").await.collect().await;
        assert_eq!(reply.len(), 1, "got {reply:?}");
        assert!(reply[0].starts_with(SETUP_ERROR_PREFIX));
        assert!(reply[0].contains("Invalid API Key"));
    }

    #[tokio::test]
    async fn test_stream_stops_at_done() {
        let base = spawn_upstream().await;
        let client = client_for(&base, "/two-fragments");

        let items: Vec<_> = client
            .stream_completion("SYS", "What are his skills?")
            .await
            .unwrap()
            .collect()
            .await;

        let contents: Vec<Option<String>> = items
            .into_iter()
            .map(|item| item.unwrap().content)
            .collect();
        assert_eq!(
            contents,
            vec![None, Some("Query ".to_string()), Some("resolved.".to_string())]
        );

        let reply: Vec<String> = answer_query(Some(&client), "skills").await.collect().await;
        assert_eq!(reply, vec!["Query ", "resolved."]);
    }

    #[tokio::test]
    async fn test_malformed_event_yields_one_error_and_stops() {
        let base = spawn_upstream().await;
        let client = client_for(&base, "/malformed");

        let items: Vec<_> = client
            .stream_completion("SYS", "projects")
            .await
            .unwrap()
            .collect()
            .await;

        assert_eq!(items.len(), 2, "got {items:?}");
        assert_eq!(
            items[0].as_ref().unwrap().content.as_deref(),
            Some("Deploying")
        );
        assert!(matches!(items[1], Err(LlmError::Parse(_))));

        let reply: Vec<String> = answer_query(Some(&client), "projects").await.collect().await;
        assert_eq!(reply.len(), 2, "got {reply:?}");
        assert_eq!(reply[0], "Deploying");
        assert!(reply[1].starts_with("\n[Network Error during stream: JSON parse error"));
    }

    #[test]
    fn test_default_endpoint_is_groq() {
        let client = LlmClient::new(TEST_KEY.to_string()).unwrap();
        assert_eq!(client.endpoint, GROQ_API_URL);
    }

    #[test]
    fn test_custom_endpoint() {
        let client = LlmClient::with_endpoint(
            TEST_KEY.to_string(),
            "http://127.0.0.1:9/v1/chat/completions".to_string(),
        )
        .unwrap();
        assert_eq!(client.endpoint, "http://127.0.0.1:9/v1/chat/completions");
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(build_request("SYS", "What are his skills?")).unwrap();
        assert_eq!(body["model"], "llama-3.3-70b-versatile");
        assert_eq!(body["temperature"], 0.5);
        assert_eq!(body["max_tokens"], 250);
        assert_eq!(body["stream"], true);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "SYS");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "What are his skills?");
        assert_eq!(body["messages"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_extract_error_message_from_json() {
        let body = r#"{"error":{"message":"Invalid API Key","type":"invalid_request_error"}}"#;
        assert_eq!(extract_error_message(body.to_string()), "Invalid API Key");
    }

    #[test]
    fn test_extract_error_message_keeps_raw_body() {
        assert_eq!(
            extract_error_message("upstream connect error".to_string()),
            "upstream connect error"
        );
    }

    #[test]
    fn test_api_error_display_preserves_message() {
        let err = LlmError::Api {
            status: 401,
            message: "Invalid API Key".to_string(),
        };
        assert_eq!(err.to_string(), "API error (status 401): Invalid API Key");
    }

    #[test]
    fn test_client_builds() {
        assert!(LlmClient::new("gsk_test".to_string()).is_ok());
    }
}
