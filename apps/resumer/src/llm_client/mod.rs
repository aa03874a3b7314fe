//! LLM Client: the single point of entry for all chat-completion calls in Resumer.
//!
//! ARCHITECTURAL RULE: No other module may call the OpenAI API directly.
//! Composers depend on the `TextGenerator` trait; `LlmClient` is the production implementation.
//!
//! Model: gpt-4o-mini (hardcoded)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

pub mod prompts;

/// The model used for all LLM calls in Resumer.
pub const MODEL: &str = "gpt-4o-mini";
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// The message content of the first choice, the only shape Resumer reads.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// Anything that can turn a prompt into generated text.
///
/// Carried in `AppState` as `Arc<dyn TextGenerator>` so tests can stub the remote endpoint.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, system: Option<&str>, prompt: &str) -> Result<String, LlmError>;
}

/// Chat-completions client with the bearer credential injected at construction.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl LlmClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_url: config.openai_api_url.clone(),
            api_key: config.openai_api_key.clone(),
        })
    }

    /// Makes a single call to the chat-completions endpoint. No retries.
    pub async fn call(&self, system: Option<&str>, prompt: &str) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model: MODEL,
            messages: build_messages(system, prompt),
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: api_error_message(body),
            });
        }

        let body = response.bytes().await?;
        let chat_response: ChatResponse = serde_json::from_slice(&body)?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat_response)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn complete(&self, system: Option<&str>, prompt: &str) -> Result<String, LlmError> {
        let response = self.call(system, prompt).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

fn build_messages<'a>(system: Option<&'a str>, prompt: &'a str) -> Vec<ChatMessage<'a>> {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = system {
        messages.push(ChatMessage {
            role: "system",
            content: system,
        });
    }
    messages.push(ChatMessage {
        role: "user",
        content: prompt,
    });
    messages
}

/// Pulls `error.message` out of an OpenAI error body, falling back to the raw body.
fn api_error_message(body: String) -> String {
    serde_json::from_str::<OpenAiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_with_system_has_two_ordered_messages() {
        let request = ChatRequest {
            model: MODEL,
            messages: build_messages(Some("be brief"), "hello"),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][0]["content"], "be brief");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["messages"][1]["content"], "hello");
    }

    #[test]
    fn test_request_without_system_has_only_user_message() {
        let messages = build_messages(None, "hello");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, "user");
    }

    #[test]
    fn test_response_text_reads_first_choice() {
        let body = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "Hello resume"}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 2, "total_tokens": 12}
        }"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.text(), Some("Hello resume"));
    }

    #[test]
    fn test_response_without_choices_has_no_text() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_response_missing_choices_fails_to_parse() {
        let result: Result<ChatResponse, _> = serde_json::from_str(r#"{"id": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_api_error_message_extracts_nested_message() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        assert_eq!(
            api_error_message(body.to_string()),
            "Incorrect API key provided"
        );
    }

    #[test]
    fn test_api_error_message_falls_back_to_raw_body() {
        assert_eq!(api_error_message("Bad Gateway".to_string()), "Bad Gateway");
    }

    // ── Against a local chat-completions endpoint ──────────────────────────

    use std::sync::{Arc, Mutex};

    use axum::{body::Bytes, http::HeaderMap, http::StatusCode, routing::post, Router};
    use serde_json::Value;

    use crate::compose::prompts::AI_ERROR_TEXT;
    use crate::compose::AiComposer;
    use crate::llm_client::prompts::RESUME_WRITER_SYSTEM;
    use crate::models::resume::ResumeFields;

    const TEST_KEY: &str = "sk-test-key";
    const SUCCESS_BODY: &str = r#"{
        "choices": [{"message": {"role": "assistant", "content": "Hello resume"}}],
        "usage": {"prompt_tokens": 12, "completion_tokens": 2}
    }"#;

    /// Requests seen by the local endpoint: authorization header and JSON body.
    type Seen = Arc<Mutex<Vec<(Option<String>, Value)>>>;

    /// Serves one canned response on an ephemeral port and returns its URL.
    async fn serve_upstream(status: StatusCode, body: &'static str) -> (String, Seen) {
        let seen: Seen = Arc::default();
        let recorder = seen.clone();
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move |headers: HeaderMap, request: Bytes| {
                let recorder = recorder.clone();
                async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    let json = serde_json::from_slice(&request).unwrap_or(Value::Null);
                    recorder.lock().unwrap().push((auth, json));
                    (status, body)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}/v1/chat/completions"), seen)
    }

    fn client_for(url: &str) -> LlmClient {
        let mut config = Config::for_tests();
        config.openai_api_url = url.to_string();
        config.openai_api_key = TEST_KEY.to_string();
        LlmClient::new(&config).unwrap()
    }

    fn composer_for(url: &str) -> AiComposer {
        AiComposer::new(Arc::new(client_for(url)))
    }

    fn jane() -> ResumeFields {
        ResumeFields {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_compose_through_client_returns_content() {
        let (url, seen) = serve_upstream(StatusCode::OK, SUCCESS_BODY).await;

        let text = composer_for(&url).compose(&jane()).await;
        assert_eq!(text, "Hello resume");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1, "exactly one request per compose");
        let (auth, body) = &seen[0];
        assert_eq!(auth.as_deref(), Some("Bearer sk-test-key"));
        assert_eq!(body["model"], MODEL);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], RESUME_WRITER_SYSTEM);
        assert_eq!(body["messages"][1]["role"], "user");
        assert!(body["messages"][1]["content"]
            .as_str()
            .unwrap()
            .contains("Jane Doe"));
    }

    #[tokio::test]
    async fn test_server_error_status_maps_to_api_error() {
        let (url, _) = serve_upstream(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error": {"message": "upstream exploded"}}"#,
        )
        .await;

        let result = client_for(&url).complete(None, "hello").await;
        match result {
            Err(LlmError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "upstream exploded");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        assert_eq!(composer_for(&url).compose(&jane()).await, AI_ERROR_TEXT);
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_parse_error() {
        let (url, _) = serve_upstream(StatusCode::OK, "this is not json").await;

        let result = client_for(&url).complete(None, "hello").await;
        assert!(matches!(result, Err(LlmError::Parse(_))), "got {result:?}");
        assert_eq!(composer_for(&url).compose(&jane()).await, AI_ERROR_TEXT);
    }

    #[tokio::test]
    async fn test_missing_content_maps_to_empty_content() {
        let (url, _) = serve_upstream(StatusCode::OK, r#"{"choices": []}"#).await;

        let result = client_for(&url).complete(None, "hello").await;
        assert!(matches!(result, Err(LlmError::EmptyContent)), "got {result:?}");
        assert_eq!(composer_for(&url).compose(&jane()).await, AI_ERROR_TEXT);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_maps_to_http_error() {
        let url = "http://127.0.0.1:1/v1/chat/completions";

        let result = client_for(url).complete(None, "hello").await;
        assert!(matches!(result, Err(LlmError::Http(_))), "got {result:?}");
        assert_eq!(composer_for(url).compose(&jane()).await, AI_ERROR_TEXT);
    }
}
