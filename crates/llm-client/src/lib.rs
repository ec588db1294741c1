//! Chat-completion client for the language-model collaborator.
//!
//! This crate provides the request/response vocabulary for talking to a
//! chat-completion service (messages, tool specs, forced tool choice) plus
//! an HTTP implementation for OpenAI-compatible endpoints. It handles:
//! - Building requests with an optional forced tool directive
//! - Sending them over HTTP and decoding text or tool-invocation replies
//! - Surfacing transport and API failures as typed errors
//!
//! The boundary is the [`CompletionService`] trait: everything above this
//! crate depends on the trait, so tests substitute stub services and never
//! touch the network. There is no retry logic here; callers own their
//! fallback behavior.

use async_trait::async_trait;
use thiserror::Error;

pub mod openai;
pub mod types;

pub use openai::OpenAiClient;
pub use types::{
    ChatMessage, ChatRequest, CompletionReply, Role, ToolCall, ToolCallFunction, ToolChoice,
    ToolFunctionSpec, ToolSpec,
};

/// Errors that can occur when talking to the completion service.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Completion API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Completion API returned no choices")]
    EmptyResponse,
}

/// Opaque request/response boundary to the language model.
///
/// One call in, one reply out: either plain text or a structured tool
/// invocation. Implementations must not retry internally; the documented
/// single-level fallback lives with the callers.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> Result<CompletionReply, CompletionError>;
}
