//! OpenAI-compatible completion gateway.
//!
//! This agent calls the Chat Completions REST API directly. Request and
//! response bodies match the OpenAI wire format field for field, so any
//! compatible host works via `with_base_url`.

use async_trait::async_trait;
use deskmate_core::error::{DeskmateError, Result};
use deskmate_core::gateway::CompletionGateway;
use deskmate_core::session::{ConversationTurn, TurnRole};
use deskmate_core::settings::{DEFAULT_MODEL_NAME, Settings};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Returned when the provider answers without a usable completion.
pub const NO_COMPLETION_FALLBACK: &str = "Sorry, I could not generate a response.";

/// Returned when a quick response comes back empty.
pub const NO_QUICK_RESPONSE_FALLBACK: &str = "No response available.";

const QUICK_RESPONSE_INSTRUCTION: &str =
    "Provide a very brief, helpful response (1-2 sentences maximum).";
const QUICK_RESPONSE_TEMPERATURE: f32 = 0.5;
const QUICK_RESPONSE_MAX_TOKENS: u32 = 100;

/// A chat-completions request body.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// One message of a request body. Roles serialize lowercase.
#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: TurnRole,
    pub content: String,
}

/// A chat-completions response body.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
    #[allow(dead_code)]
    r#type: Option<String>,
    #[allow(dead_code)]
    code: Option<String>,
}

/// The HTTP round trip behind the gateway.
///
/// Split out so the gateway's credential check can be verified to run
/// before any network activity, and so tests can stand in for the wire.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Performs exactly one POST of `request` authenticated with `api_key`.
    async fn send(
        &self,
        request: &ChatCompletionRequest,
        api_key: &str,
    ) -> Result<ChatCompletionResponse>;
}

/// Production transport over `reqwest`.
pub struct HttpChatTransport {
    client: Client,
    base_url: String,
}

impl HttpChatTransport {
    /// Creates a transport against the OpenAI endpoint.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Overrides the endpoint (OpenAI-compatible hosts, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for HttpChatTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn send(
        &self,
        request: &ChatCompletionRequest,
        api_key: &str,
    ) -> Result<ChatCompletionResponse> {
        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|err| DeskmateError::transport(format!("Completion request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        response.json::<ChatCompletionResponse>().await.map_err(|err| {
            DeskmateError::transport(format!("Failed to parse completion response: {err}"))
        })
    }
}

/// Gateway implementation over the chat-completions wire format.
///
/// Performs one best-effort request per call, without retries or caching.
pub struct OpenAiCompletionAgent {
    transport: Arc<dyn ChatTransport>,
}

impl OpenAiCompletionAgent {
    /// Creates an agent against the OpenAI endpoint.
    pub fn new() -> Self {
        Self {
            transport: Arc::new(HttpChatTransport::new()),
        }
    }

    /// Creates an agent against an OpenAI-compatible endpoint.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            transport: Arc::new(HttpChatTransport::new().with_base_url(base_url)),
        }
    }

    /// Creates an agent over a custom transport (used by tests).
    pub fn with_transport(transport: Arc<dyn ChatTransport>) -> Self {
        Self { transport }
    }
}

impl Default for OpenAiCompletionAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionGateway for OpenAiCompletionAgent {
    async fn complete(&self, turns: &[ConversationTurn], settings: &Settings) -> Result<String> {
        let api_key = require_api_key(settings)?;
        let request = build_chat_request(turns, settings);

        tracing::debug!(
            "[Completion] Sending {} messages to model {}",
            request.messages.len(),
            request.model
        );
        let response = self.transport.send(&request, api_key).await?;

        Ok(extract_completion_text(response)
            .unwrap_or_else(|| NO_COMPLETION_FALLBACK.to_string()))
    }

    async fn quick_response(&self, prompt: &str, settings: &Settings) -> Result<String> {
        let api_key = require_api_key(settings)?;
        let request = ChatCompletionRequest {
            model: DEFAULT_MODEL_NAME.to_string(),
            messages: vec![
                ChatMessage {
                    role: TurnRole::System,
                    content: QUICK_RESPONSE_INSTRUCTION.to_string(),
                },
                ChatMessage {
                    role: TurnRole::User,
                    content: prompt.to_string(),
                },
            ],
            temperature: QUICK_RESPONSE_TEMPERATURE,
            max_tokens: QUICK_RESPONSE_MAX_TOKENS,
        };

        let response = self.transport.send(&request, api_key).await?;

        Ok(extract_completion_text(response)
            .unwrap_or_else(|| NO_QUICK_RESPONSE_FALLBACK.to_string()))
    }
}

/// Rejects the call before any network activity when no key is configured.
fn require_api_key(settings: &Settings) -> Result<&str> {
    settings
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or_else(|| {
            DeskmateError::not_configured(
                "OpenAI API key not configured. Please set your API key in settings.",
            )
        })
}

fn build_chat_request(turns: &[ConversationTurn], settings: &Settings) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: settings.model_name.clone(),
        messages: turns
            .iter()
            .map(|turn| ChatMessage {
                role: turn.role,
                content: turn.content.clone(),
            })
            .collect(),
        temperature: settings.temperature,
        max_tokens: settings.max_output_tokens,
    }
}

fn extract_completion_text(response: ChatCompletionResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|text| !text.is_empty())
}

fn map_http_error(status: StatusCode, body: String) -> DeskmateError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or_else(|_| body.clone());

    DeskmateError::transport_status(status.as_u16(), message)
}
