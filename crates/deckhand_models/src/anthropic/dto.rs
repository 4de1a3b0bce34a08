//! Wire types for the Anthropic Messages API.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One message in an Anthropic request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnthropicMessage {
    /// "user" or "assistant"
    pub role: String,
    /// Plain-text content
    pub content: String,
}

/// Body of `POST /v1/messages`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnthropicRequest {
    /// Model identifier
    pub model: String,
    /// Output token cap
    pub max_tokens: u32,
    /// Conversation
    pub messages: Vec<AnthropicMessage>,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Token accounting returned with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Getters)]
pub struct AnthropicUsage {
    /// Prompt tokens
    #[serde(default)]
    input_tokens: u32,
    /// Completion tokens
    #[serde(default)]
    output_tokens: u32,
}

/// Response from `POST /v1/messages`.
///
/// Content blocks are kept as raw JSON so block types this client does not
/// model still reach the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct AnthropicResponse {
    /// Response identifier
    id: String,
    /// Model that answered
    #[serde(default)]
    model: String,
    /// Content blocks in order
    #[serde(default)]
    content: Vec<serde_json::Value>,
    /// Why generation stopped
    #[serde(default)]
    stop_reason: Option<String>,
    /// Token usage
    #[serde(default)]
    usage: AnthropicUsage,
}
