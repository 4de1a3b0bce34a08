//! Trait definitions for providers, topic sources and artifact storage.

use async_trait::async_trait;
use deckhand_core::{
    CatalogEntry, CompletedGeneration, GenerateRequest, GenerateResponse, ImagePayload,
    ImageRequest, StoredLocation,
};
use deckhand_error::{DeckhandResult, ProviderError, ProviderErrorKind};

/// A text-generation backend.
///
/// Used for topic and outline requests. Implementations perform exactly one
/// provider call per `generate` and never retry.
#[async_trait]
pub trait TextDriver: Send + Sync {
    /// Send one request and return the provider's content blocks in order.
    async fn generate(&self, req: &GenerateRequest) -> DeckhandResult<GenerateResponse>;

    /// Provider name (e.g., "anthropic").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "claude-3-5-sonnet-20240620").
    fn model_name(&self) -> &str;
}

/// An image-generation backend.
///
/// A quota rejection must surface as a retryable error
/// ([`ProviderErrorKind::RateLimited`]) so the image client can back off.
#[async_trait]
pub trait ImageDriver: Send + Sync {
    /// Request one image.
    async fn generate_image(&self, req: &ImageRequest) -> DeckhandResult<ImagePayload>;

    /// Fetch a provider-hosted image, returning its MIME type and bytes.
    ///
    /// Providers that only ever return inline bytes can keep the default,
    /// which refuses.
    async fn download(&self, url: &str) -> DeckhandResult<(String, Vec<u8>)> {
        Err(ProviderError::new(ProviderErrorKind::UnsupportedOutput(format!(
            "{} does not return hosted images: {}",
            self.provider_name(),
            url
        )))
        .into())
    }

    /// Provider name (e.g., "openai", "stability").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "dall-e-3").
    fn model_name(&self) -> &str;
}

/// Where a run's topic comes from.
#[async_trait]
pub trait TopicSource: Send + Sync {
    /// Produce the next topic.
    ///
    /// An exhausted pool or a model that declines to answer is a
    /// `NoTopicAvailable` pipeline error.
    async fn next_topic(&self) -> DeckhandResult<String>;

    /// Short strategy name for logs.
    fn source_name(&self) -> &'static str;
}

/// Durable storage for completed generations.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Write a completed generation.
    ///
    /// The generation is not listable until every image and the manifest
    /// have been written.
    async fn persist(&self, generation: &CompletedGeneration) -> DeckhandResult<StoredLocation>;

    /// Every complete generation, newest first, ties broken by topic.
    async fn list_all(&self) -> DeckhandResult<Vec<CatalogEntry>>;
}
