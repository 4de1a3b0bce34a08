//! Text and image provider integrations for Deckhand.
//!
//! # Available Providers
//!
//! - **Anthropic** (Claude) - topic and outline text
//! - **OpenAI** (DALL-E) - slide images, returned as a hosted URL or inline base64
//! - **Stability AI** (stable-image ultra) - slide images, returned as raw bytes
//!
//! Each client reads its key from the environment via `from_env`. Image
//! clients report HTTP 429 as a retryable
//! [`RateLimited`](deckhand_error::ProviderErrorKind::RateLimited) error carrying
//! the provider's reset hint.
//!
//! ```no_run
//! use deckhand_core::{GenerateRequestBuilder, Message, TextConfig};
//! use deckhand_interface::TextDriver;
//! use deckhand_models::AnthropicClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AnthropicClient::from_env(&TextConfig::default())?;
//! let request = GenerateRequestBuilder::default()
//!     .messages(vec![Message::user("Name one absurd presentation topic")])
//!     .build()?;
//! let response = client.generate(&request).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod anthropic;
mod credentials;
mod download;
mod openai;
mod stability;

pub use anthropic::{
    AnthropicClient, AnthropicMessage, AnthropicRequest, AnthropicResponse, AnthropicUsage,
};
pub use credentials::api_key_from_env;
pub use download::download_image;
pub use openai::{OpenAiImageClient, OpenAiImageData, OpenAiImageRequest, OpenAiImageResponse};
pub use stability::StabilityImageClient;

use deckhand_core::{ImageConfig, ImageProviderKind};
use deckhand_error::DeckhandResult;
use deckhand_interface::ImageDriver;
use std::sync::Arc;

/// Build the image driver selected by `[image] provider`.
pub fn image_driver_from_config(config: &ImageConfig) -> DeckhandResult<Arc<dyn ImageDriver>> {
    Ok(match config.provider {
        ImageProviderKind::OpenAi => Arc::new(OpenAiImageClient::from_env(config)?),
        ImageProviderKind::Stability => Arc::new(StabilityImageClient::from_env(config)?),
    })
}
