//! Wire types for `POST /v1/images/generations`.

use deckhand_core::ImageResponseFormat;
use serde::{Deserialize, Serialize};

/// Request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenAiImageRequest {
    /// Model identifier
    pub model: String,
    /// Image description
    pub prompt: String,
    /// Number of images; always 1
    pub n: u32,
    /// Size, e.g. "1024x1024"
    pub size: String,
    /// Hosted URL or inline base64
    pub response_format: ImageResponseFormat,
}

/// One generated image.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OpenAiImageData {
    /// Hosted image location
    #[serde(default)]
    pub url: Option<String>,
    /// Inline base64 PNG
    #[serde(default)]
    pub b64_json: Option<String>,
    /// Prompt as rewritten by the model
    #[serde(default)]
    pub revised_prompt: Option<String>,
}

/// Response body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OpenAiImageResponse {
    /// Unix timestamp
    #[serde(default)]
    pub created: u64,
    /// Generated images
    #[serde(default)]
    pub data: Vec<OpenAiImageData>,
}
