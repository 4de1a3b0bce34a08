use crate::{AnthropicMessage, AnthropicRequest, AnthropicResponse, api_key_from_env};
use deckhand_core::{GenerateRequest, GenerateResponse, Output, TextConfig, ToolCall};
use deckhand_error::{DeckhandResult, ProviderError, ProviderErrorKind};
use deckhand_interface::TextDriver;
use deckhand_rate_limit::RateLimitHeaders;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Anthropic API client.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl AnthropicClient {
    /// Creates a new Anthropic client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Anthropic API key
    /// * `model` - Model identifier (e.g., "claude-3-5-sonnet-20240620")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        debug!("Creating new Anthropic client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: ANTHROPIC_API_URL.to_string(),
        }
    }

    /// Reads `ANTHROPIC_KEY` (or `ANTHROPIC_API_KEY`) and the `[text]` model.
    pub fn from_env(config: &TextConfig) -> DeckhandResult<Self> {
        let key = api_key_from_env(&["ANTHROPIC_KEY", "ANTHROPIC_API_KEY"])?;
        Ok(Self::new(key, &config.model))
    }

    /// Point the client at a different API host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sends a request to the Anthropic API.
    ///
    /// `extra_headers` are added verbatim, e.g. `anthropic-beta`.
    #[instrument(skip(self, request, extra_headers), fields(model = %request.model))]
    pub async fn generate_anthropic(
        &self,
        request: &AnthropicRequest,
        extra_headers: impl IntoIterator<Item = (&str, &str)>,
    ) -> DeckhandResult<AnthropicResponse> {
        debug!("Sending request to Anthropic API");

        let mut builder = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json");
        for (name, value) in extra_headers {
            builder = builder.header(name, value);
        }

        let response = builder.json(request).send().await.map_err(|e| {
            error!(error = ?e, "Failed to send request to Anthropic API");
            ProviderError::new(ProviderErrorKind::Http(format!("Request failed: {}", e)))
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let limits = RateLimitHeaders::from_headers(response.headers());
            let body = response.text().await.unwrap_or_default();
            warn!(body = %body, "Anthropic API rate limited");
            return Err(limits.into_error(body).into());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Anthropic API returned error");
            return Err(ProviderError::new(ProviderErrorKind::Api {
                status: status.as_u16(),
                message: body,
            })
            .into());
        }

        let anthropic_response: AnthropicResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse Anthropic response");
            ProviderError::new(ProviderErrorKind::Parse(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        debug!(response_id = %anthropic_response.id(), "Received response from Anthropic");
        Ok(anthropic_response)
    }

    fn convert_request(&self, request: &GenerateRequest) -> AnthropicRequest {
        let messages = request
            .messages
            .iter()
            .map(|msg| AnthropicMessage {
                role: msg.role.to_string(),
                content: msg.content.clone(),
            })
            .collect();

        AnthropicRequest {
            model: request.model.clone().unwrap_or_else(|| self.model.clone()),
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            messages,
            temperature: request.temperature,
        }
    }

    /// Map content blocks to outputs, preserving order.
    ///
    /// `text` blocks become [`Output::Text`], `tool_use` blocks become
    /// [`Output::ToolCalls`], anything else is passed through as JSON.
    pub fn convert_response(response: &AnthropicResponse) -> GenerateResponse {
        let outputs = response
            .content()
            .iter()
            .map(|block| match block.get("type").and_then(Value::as_str) {
                Some("text") => match block.get("text").and_then(Value::as_str) {
                    Some(text) => Output::Text(text.to_string()),
                    None => Output::Json(block.clone()),
                },
                Some("tool_use") => Output::ToolCalls(vec![ToolCall {
                    id: block
                        .get("id")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    name: block
                        .get("name")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    arguments: block.get("input").cloned().unwrap_or(Value::Null),
                }]),
                _ => Output::Json(block.clone()),
            })
            .collect();

        GenerateResponse { outputs }
    }
}

#[async_trait::async_trait]
impl TextDriver for AnthropicClient {
    fn provider_name(&self) -> &'static str {
        "anthropic"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, request), fields(messages = request.messages.len()))]
    async fn generate(&self, request: &GenerateRequest) -> DeckhandResult<GenerateResponse> {
        debug!("Generating response with Anthropic");

        let anthropic_request = self.convert_request(request);
        let headers = request
            .extra_headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()));
        let anthropic_response = self.generate_anthropic(&anthropic_request, headers).await?;

        Ok(Self::convert_response(&anthropic_response))
    }
}
