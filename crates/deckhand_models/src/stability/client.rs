use crate::api_key_from_env;
use deckhand_core::{ImageConfig, ImagePayload, ImageRequest};
use deckhand_error::{DeckhandResult, ProviderError, ProviderErrorKind};
use deckhand_interface::ImageDriver;
use deckhand_rate_limit::RateLimitHeaders;
use reqwest::Client;
use reqwest::multipart::Form;
use tracing::{debug, error, instrument, warn};

const STABILITY_API_URL: &str = "https://api.stability.ai";
const ULTRA_PATH: &str = "/v2beta/stable-image/generate/ultra";

/// Stability AI client for the stable-image ultra endpoint.
///
/// The endpoint answers with raw image bytes, so nothing needs downloading.
#[derive(Debug, Clone)]
pub struct StabilityImageClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl StabilityImageClient {
    /// Creates a new client.
    pub fn new(api_key: impl Into<String>) -> Self {
        debug!("Creating new Stability image client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: STABILITY_API_URL.to_string(),
        }
    }

    /// Reads `STABILITY_API_KEY`.
    pub fn from_env(_config: &ImageConfig) -> DeckhandResult<Self> {
        Ok(Self::new(api_key_from_env(&["STABILITY_API_KEY"])?))
    }

    /// Point the client at a different API host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait::async_trait]
impl ImageDriver for StabilityImageClient {
    fn provider_name(&self) -> &'static str {
        "stability"
    }

    fn model_name(&self) -> &str {
        "stable-image-ultra"
    }

    #[instrument(skip(self, request))]
    async fn generate_image(&self, request: &ImageRequest) -> DeckhandResult<ImagePayload> {
        debug!("Requesting image from Stability");

        let form = Form::new().text("prompt", request.description.clone());

        let response = self
            .client
            .post(format!("{}{}", self.base_url, ULTRA_PATH))
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "image/*")
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to Stability");
                ProviderError::new(ProviderErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let limits = RateLimitHeaders::from_headers(response.headers());
            let message = response.text().await.unwrap_or_default();
            warn!(reset = ?limits.reset, "Stability rate limited");
            return Err(limits.into_error(message).into());
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = %status, body = %message, "Stability returned error");
            return Err(ProviderError::new(ProviderErrorKind::Api {
                status: status.as_u16(),
                message,
            })
            .into());
        }

        let mime = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| v.starts_with("image/"))
            .unwrap_or("image/png")
            .to_string();

        let data = response.bytes().await.map_err(|e| {
            ProviderError::new(ProviderErrorKind::Http(format!(
                "Failed to read image body: {}",
                e
            )))
        })?;

        debug!(mime = %mime, size = data.len(), "Received image from Stability");
        Ok(ImagePayload::Bytes {
            mime,
            data: data.to_vec(),
        })
    }
}
