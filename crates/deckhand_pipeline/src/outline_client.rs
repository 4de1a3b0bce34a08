//! Text requests for topics and outlines.

use deckhand_core::{GenerateRequest, Message, Output, TextConfig};
use deckhand_error::{OutlineRequestFailure, PipelineError, PipelineErrorKind};
use deckhand_interface::TextDriver;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, instrument};

/// Everything needed for one text request.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptConfiguration {
    /// User prompt
    pub prompt: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Output token budget
    pub max_tokens: u32,
    /// Provider-specific headers, e.g. an extended-output opt-in
    pub headers: BTreeMap<String, String>,
}

impl PromptConfiguration {
    /// A prompt with the `[text]` section's temperature and token budget.
    pub fn new(prompt: impl Into<String>, text: &TextConfig) -> Self {
        Self {
            prompt: prompt.into(),
            temperature: text.temperature,
            max_tokens: text.max_tokens,
            headers: BTreeMap::new(),
        }
    }

    /// Add a provider header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Sends one prompt and returns the first content block as text.
///
/// Nothing is retried here; a provider failure surfaces as
/// `OutlineRequestFailed(ProviderError)` and a non-text first block as
/// `OutlineRequestFailed(UnexpectedContentKind)`.
#[derive(Clone)]
pub struct OutlineClient {
    driver: Arc<dyn TextDriver>,
}

impl OutlineClient {
    /// Wrap a text driver.
    pub fn new(driver: Arc<dyn TextDriver>) -> Self {
        Self { driver }
    }

    /// Send the prompt and return the first text block.
    #[instrument(
        skip(self, config),
        fields(
            provider = self.driver.provider_name(),
            model = self.driver.model_name(),
            prompt_len = config.prompt.len()
        )
    )]
    pub async fn request_text(&self, config: &PromptConfiguration) -> Result<String, PipelineError> {
        let request = GenerateRequest {
            messages: vec![Message::user(config.prompt.clone())],
            max_tokens: Some(config.max_tokens),
            temperature: Some(config.temperature),
            model: None,
            extra_headers: config.headers.clone(),
        };

        let response = self.driver.generate(&request).await.map_err(|e| {
            error!(error = %e, "Text provider request failed");
            PipelineError::new(PipelineErrorKind::OutlineRequestFailed(
                OutlineRequestFailure::ProviderError(e.to_string()),
            ))
        })?;

        match response.first() {
            Some(Output::Text(text)) => {
                debug!(len = text.len(), "Received text response");
                Ok(text.clone())
            }
            Some(other) => {
                error!(kind = other.kind_name(), "Expected text response");
                Err(PipelineError::new(PipelineErrorKind::OutlineRequestFailed(
                    OutlineRequestFailure::UnexpectedContentKind(other.kind_name().to_string()),
                )))
            }
            None => {
                error!("Text provider returned no content");
                Err(PipelineError::new(PipelineErrorKind::OutlineRequestFailed(
                    OutlineRequestFailure::UnexpectedContentKind("nothing".to_string()),
                )))
            }
        }
    }
}
