//! Fetching provider-hosted images.

use deckhand_error::{DeckhandResult, ProviderError, ProviderErrorKind};
use reqwest::Client;
use tracing::{debug, error, instrument};

/// GET an image URL and return its MIME type and bytes.
///
/// The MIME type comes from `content-type`, defaulting to `image/png`.
#[instrument(skip(client))]
pub async fn download_image(client: &Client, url: &str) -> DeckhandResult<(String, Vec<u8>)> {
    let response = client.get(url).send().await.map_err(|e| {
        error!(error = ?e, "Image download request failed");
        ProviderError::new(ProviderErrorKind::Download(format!("Request failed: {}", e)))
    })?;

    let status = response.status();
    if !status.is_success() {
        error!(status = %status, "Image download returned error status");
        return Err(ProviderError::new(ProviderErrorKind::Download(format!(
            "HTTP {} fetching {}",
            status.as_u16(),
            url
        )))
        .into());
    }

    let mime = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
        .filter(|v| v.starts_with("image/"))
        .unwrap_or_else(|| "image/png".to_string());

    let bytes = response.bytes().await.map_err(|e| {
        ProviderError::new(ProviderErrorKind::Download(format!(
            "Failed to read body: {}",
            e
        )))
    })?;

    debug!(mime = %mime, size = bytes.len(), "Downloaded image");
    Ok((mime, bytes.to_vec()))
}
