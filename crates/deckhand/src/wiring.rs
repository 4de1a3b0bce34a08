//! Build a pipeline from configuration and environment credentials.

use deckhand_core::{DeckhandConfig, TopicSourceKind};
use deckhand_error::DeckhandResult;
use deckhand_interface::{ArtifactStore, TextDriver, TopicSource};
use deckhand_models::{AnthropicClient, image_driver_from_config};
use deckhand_pipeline::{LlmTopicSource, OutlineClient, PipelineOrchestrator, TopicPool};
use deckhand_storage::FileSystemArtifactStore;
use std::sync::Arc;
use tracing::{info, instrument};

/// Wire the providers, topic source and store named by `config`.
///
/// # Errors
///
/// Returns `MissingApiKey` if a selected provider's credential is not set.
#[instrument(skip(config), fields(image_provider = %config.image.provider))]
pub fn build_orchestrator(config: &DeckhandConfig) -> DeckhandResult<PipelineOrchestrator> {
    let text: Arc<dyn TextDriver> = Arc::new(AnthropicClient::from_env(&config.text)?);
    let images = image_driver_from_config(&config.image)?;
    let topics = topic_source_from_config(config, text.clone());
    let store: Arc<dyn ArtifactStore> = Arc::new(FileSystemArtifactStore::new(&config.storage.root));

    info!(
        text_model = text.model_name(),
        image_model = images.model_name(),
        topic_source = topics.source_name(),
        storage = %config.storage.root.display(),
        max_concurrent = config.image.max_concurrent,
        "Pipeline wired"
    );

    Ok(PipelineOrchestrator::new(topics, text, images, store, config))
}

/// The topic source selected by `[topic] source`.
pub fn topic_source_from_config(config: &DeckhandConfig, text: Arc<dyn TextDriver>) -> Arc<dyn TopicSource> {
    match config.topic.source {
        TopicSourceKind::Llm => Arc::new(LlmTopicSource::new(OutlineClient::new(text), &config.text)),
        TopicSourceKind::Pool => Arc::new(TopicPool::new(&config.topic.pool_path)),
    }
}
