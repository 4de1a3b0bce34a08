//! Image requests with rate-limit backoff.

use deckhand_core::{GeneratedImage, ImagePayload, ImageRequest};
use deckhand_error::{DeckhandResult, ProviderErrorKind, RetryableError};
use deckhand_interface::ImageDriver;
use deckhand_rate_limit::BackoffPolicy;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

const DOWNLOAD_RETRIES: usize = 2;

/// Requests images from a provider, absorbing rate limits.
///
/// A retryable rejection (HTTP 429) is never reported to the caller: the
/// client waits for the provider's reset hint (or the policy's default
/// window) plus jitter and sends the identical request again, re-reading the
/// hint every time. Other errors propagate at once.
///
/// Waiting only suspends the calling task, so concurrent requests keep going.
#[derive(Clone)]
pub struct ImageClient {
    driver: Arc<dyn ImageDriver>,
    policy: BackoffPolicy,
}

impl ImageClient {
    /// Wrap an image driver with a backoff policy.
    pub fn new(driver: Arc<dyn ImageDriver>, policy: BackoffPolicy) -> Self {
        Self { driver, policy }
    }

    /// The backoff policy in use.
    pub fn policy(&self) -> &BackoffPolicy {
        &self.policy
    }

    /// Request one image, retrying through rate limits.
    #[instrument(skip(self, description), fields(provider = self.driver.provider_name()))]
    pub async fn request_image(&self, description: &str) -> DeckhandResult<ImagePayload> {
        let request = ImageRequest::new(description);
        let mut retries: u32 = 0;

        loop {
            match self.driver.generate_image(&request).await {
                Ok(payload) => {
                    if retries > 0 {
                        info!(retries, "Image request succeeded after rate limiting");
                    }
                    return Ok(payload);
                }
                Err(e) if e.is_retryable() && self.policy.may_retry(retries) => {
                    let wait = self.policy.delay(e.retry_after());
                    warn!(
                        retries,
                        hint_ms = e.retry_after().map(|d| d.as_millis() as u64),
                        wait_ms = wait.as_millis() as u64,
                        "Image provider rate limited, backing off"
                    );
                    tokio::time::sleep(wait).await;
                    retries += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Request the image for one slide and make sure its bytes are in hand.
    ///
    /// Hosted URLs are short-lived, so they are downloaded here, with up to
    /// two retries on download failure.
    #[instrument(skip(self, description))]
    pub async fn generate(&self, slide_index: usize, description: &str) -> DeckhandResult<GeneratedImage> {
        match self.request_image(description).await? {
            ImagePayload::Bytes { mime, data } => {
                debug!(size = data.len(), "Received inline image");
                Ok(GeneratedImage {
                    slide_index,
                    mime_type: mime,
                    data,
                    source_url: None,
                })
            }
            ImagePayload::Url(url) => {
                let (mime, data) = self.download(&url).await?;
                debug!(size = data.len(), "Downloaded hosted image");
                Ok(GeneratedImage {
                    slide_index,
                    mime_type: mime,
                    data,
                    source_url: Some(url),
                })
            }
        }
    }

    async fn download(&self, url: &str) -> DeckhandResult<(String, Vec<u8>)> {
        use tokio_retry2::{Retry, RetryError, strategy::ExponentialBackoff, strategy::jitter};

        let retry_strategy = ExponentialBackoff::from_millis(2)
            .factor(250)
            .max_delay(Duration::from_secs(5))
            .map(jitter)
            .take(DOWNLOAD_RETRIES);

        Retry::spawn(retry_strategy, || async {
            self.driver.download(url).await.map_err(|e| {
                let transient = e
                    .as_provider()
                    .is_some_and(|p| matches!(p.kind, ProviderErrorKind::Download(_)));
                if transient {
                    warn!(error = %e, "Image download failed, will retry");
                    RetryError::Transient {
                        err: e,
                        retry_after: None,
                    }
                } else {
                    RetryError::Permanent(e)
                }
            })
        })
        .await
    }
}
