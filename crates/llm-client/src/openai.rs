//! HTTP client for an OpenAI-compatible chat-completions endpoint.

use crate::types::{ChatRequest, CompletionReply, ToolCall};
use crate::{CompletionError, CompletionService};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for an OpenAI-compatible chat-completions API.
///
/// This is deliberately thin: one request in, one reply out. Retries,
/// fallbacks, and degraded conversational paths are the callers' concern.
#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiClient {
    /// Create a client for the default OpenAI endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Point the client at a compatible endpoint (proxy, local server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// The endpoint this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

// Wire format of the completions response; only the fields we consume.

#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<ToolCall>,
}

#[async_trait]
impl CompletionService for OpenAiClient {
    async fn complete(&self, request: ChatRequest) -> Result<CompletionReply, CompletionError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            forced_tool = request.tool_choice.is_some(),
            "Sending completion request"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "Completion API returned an error");
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let api: ApiResponse = response.json().await?;
        let choice = api
            .choices
            .into_iter()
            .next()
            .ok_or(CompletionError::EmptyResponse)?;

        Ok(CompletionReply {
            content: choice.message.content,
            tool_calls: choice.message.tool_calls,
        })
    }
}
