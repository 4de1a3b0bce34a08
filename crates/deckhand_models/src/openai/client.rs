use crate::{OpenAiImageRequest, OpenAiImageResponse, api_key_from_env, download_image};
use base64::Engine;
use deckhand_core::{ImageConfig, ImagePayload, ImageRequest, ImageResponseFormat};
use deckhand_error::{DeckhandResult, ProviderError, ProviderErrorKind};
use deckhand_interface::ImageDriver;
use deckhand_rate_limit::RateLimitHeaders;
use reqwest::Client;
use tracing::{debug, error, instrument, warn};

const OPENAI_API_URL: &str = "https://api.openai.com";

/// OpenAI image generation client.
#[derive(Debug, Clone)]
pub struct OpenAiImageClient {
    client: Client,
    api_key: String,
    model: String,
    size: String,
    response_format: ImageResponseFormat,
    base_url: String,
}

impl OpenAiImageClient {
    /// Creates a client for `model` producing `size` images.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        size: impl Into<String>,
        response_format: ImageResponseFormat,
    ) -> Self {
        debug!("Creating new OpenAI image client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            size: size.into(),
            response_format,
            base_url: OPENAI_API_URL.to_string(),
        }
    }

    /// Reads `OPENAI_KEY` (or `OPENAI_API_KEY`) and the `[image]` section.
    pub fn from_env(config: &ImageConfig) -> DeckhandResult<Self> {
        let key = api_key_from_env(&["OPENAI_KEY", "OPENAI_API_KEY"])?;
        Ok(Self::new(
            key,
            &config.model,
            &config.size,
            config.response_format,
        ))
    }

    /// Point the client at a different API host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn payload_from(&self, response: OpenAiImageResponse) -> DeckhandResult<ImagePayload> {
        let Some(image) = response.data.into_iter().next() else {
            return Err(ProviderError::new(ProviderErrorKind::Parse(
                "Response contained no images".to_string(),
            ))
            .into());
        };

        if let Some(revised) = &image.revised_prompt {
            debug!(revised_prompt = %revised, "Model revised the prompt");
        }

        match (image.b64_json, image.url) {
            (Some(encoded), _) => {
                let data = base64::engine::general_purpose::STANDARD
                    .decode(encoded.as_bytes())
                    .map_err(|e| {
                        ProviderError::new(ProviderErrorKind::Parse(format!(
                            "Invalid base64 image: {}",
                            e
                        )))
                    })?;
                Ok(ImagePayload::Bytes {
                    mime: "image/png".to_string(),
                    data,
                })
            }
            (None, Some(url)) => Ok(ImagePayload::Url(url)),
            (None, None) => Err(ProviderError::new(ProviderErrorKind::UnsupportedOutput(
                "Image has neither url nor b64_json".to_string(),
            ))
            .into()),
        }
    }
}

#[async_trait::async_trait]
impl ImageDriver for OpenAiImageClient {
    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, request), fields(model = %self.model, size = %self.size))]
    async fn generate_image(&self, request: &ImageRequest) -> DeckhandResult<ImagePayload> {
        debug!("Requesting image from OpenAI");

        let body = OpenAiImageRequest {
            model: self.model.clone(),
            prompt: request.description.clone(),
            n: 1,
            size: self.size.clone(),
            response_format: self.response_format,
        };

        let response = self
            .client
            .post(format!("{}/v1/images/generations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to OpenAI");
                ProviderError::new(ProviderErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let limits = RateLimitHeaders::from_headers(response.headers());
            let message = response.text().await.unwrap_or_default();
            warn!(reset = ?limits.reset, remaining = ?limits.remaining, "OpenAI image quota exhausted");
            return Err(limits.into_error(message).into());
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = %status, body = %message, "OpenAI returned error");
            return Err(ProviderError::new(ProviderErrorKind::Api {
                status: status.as_u16(),
                message,
            })
            .into());
        }

        let parsed: OpenAiImageResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse OpenAI response");
            ProviderError::new(ProviderErrorKind::Parse(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        self.payload_from(parsed)
    }

    async fn download(&self, url: &str) -> DeckhandResult<(String, Vec<u8>)> {
        download_image(&self.client, url).await
    }
}
