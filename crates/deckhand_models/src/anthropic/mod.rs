//! Anthropic Messages API client.

mod client;
mod dto;

pub use client::AnthropicClient;
pub use dto::{AnthropicMessage, AnthropicRequest, AnthropicResponse, AnthropicUsage};
