//! Request and response types for text generation.

use crate::{Message, Output};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Provider-agnostic text generation request.
///
/// # Examples
///
/// ```
/// use deckhand_core::{GenerateRequestBuilder, Message};
///
/// let request = GenerateRequestBuilder::default()
///     .messages(vec![Message::user("Name a topic")])
///     .temperature(0.8f32)
///     .max_tokens(8000u32)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.max_tokens, Some(8000));
/// assert!(request.extra_headers.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, Builder)]
#[builder(
    setter(into, strip_option),
    default,
    build_fn(error = "deckhand_error::BuilderError")
)]
pub struct GenerateRequest {
    /// Conversation messages
    pub messages: Vec<Message>,
    /// Maximum number of output tokens
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Model override; providers fall back to their configured model
    pub model: Option<String>,
    /// Provider-specific headers, e.g. an extended-output opt-in flag
    #[serde(default)]
    pub extra_headers: BTreeMap<String, String>,
}

/// Content blocks returned by a text provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Blocks in provider order
    pub outputs: Vec<Output>,
}

impl GenerateResponse {
    /// The first block, if any.
    pub fn first(&self) -> Option<&Output> {
        self.outputs.first()
    }
}
