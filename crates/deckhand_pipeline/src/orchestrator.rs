//! Drives one generation from topic to stored artifact.

use crate::{ImageClient, OutlineClient, OutlineParser, PromptConfiguration, outline_prompt};
use deckhand_core::{
    CompletedGeneration, DeckhandConfig, GeneratedImages, PipelineConfig, SlideDeckOutline,
    StoredLocation, TextConfig,
};
use deckhand_error::{DeckhandError, PipelineError, PipelineErrorKind};
use deckhand_interface::{ArtifactStore, ImageDriver, TextDriver, TopicSource};
use deckhand_rate_limit::{AdmissionLimiter, BackoffPolicy};
use futures::stream::{FuturesUnordered, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

const BETA_HEADER: &str = "anthropic-beta";

/// Where a run is, or where it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    /// Nothing done yet
    #[default]
    #[display("start")]
    Start,
    /// A topic has been chosen
    #[display("topic_acquired")]
    TopicAcquired,
    /// The outline parsed and validated
    #[display("outline_acquired")]
    OutlineAcquired,
    /// Every image slide has its image
    #[display("images_acquired")]
    ImagesAcquired,
    /// The generation is on disk (terminal success)
    #[display("persisted")]
    Persisted,
    /// The run stopped (terminal failure)
    #[display("failed")]
    Failed,
}

/// Outcome of one run.
///
/// On failure `error` is set, `state` is [`PipelineState::Failed`], and the
/// other fields hold whatever was produced before the failure; `images` may
/// then be incomplete.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Final state
    pub state: PipelineState,
    /// Last state reached before stopping
    pub reached: PipelineState,
    /// Chosen topic
    pub topic: Option<String>,
    /// Validated outline
    pub outline: Option<SlideDeckOutline>,
    /// Images produced, by slide index
    pub images: GeneratedImages,
    /// Where the generation was stored
    pub location: Option<StoredLocation>,
    /// Why the run failed
    pub error: Option<PipelineError>,
}

impl GenerationReport {
    /// Whether the generation was persisted.
    pub fn is_success(&self) -> bool {
        self.state == PipelineState::Persisted
    }

    fn advance(&mut self, state: PipelineState) {
        info!(from = %self.reached, to = %state, "Pipeline stage complete");
        self.state = state;
        self.reached = state;
    }
}

/// Runs the topic, outline, image and persistence stages.
///
/// Image slides are requested concurrently, at most `[image] max_concurrent`
/// at a time. The first image that fails for a reason other than a rate
/// limit stops the run; requests still in flight are dropped and nothing is
/// persisted.
#[derive(Clone)]
pub struct PipelineOrchestrator {
    topics: Arc<dyn TopicSource>,
    outline_client: OutlineClient,
    parser: OutlineParser,
    images: ImageClient,
    limiter: AdmissionLimiter,
    store: Arc<dyn ArtifactStore>,
    text: TextConfig,
    pipeline: PipelineConfig,
}

impl PipelineOrchestrator {
    /// Wire a pipeline from its collaborators and configuration.
    pub fn new(
        topics: Arc<dyn TopicSource>,
        text_driver: Arc<dyn TextDriver>,
        image_driver: Arc<dyn ImageDriver>,
        store: Arc<dyn ArtifactStore>,
        config: &DeckhandConfig,
    ) -> Self {
        Self {
            topics,
            outline_client: OutlineClient::new(text_driver),
            parser: OutlineParser::new(config.pipeline.max_title_slides),
            images: ImageClient::new(image_driver, BackoffPolicy::from_config(&config.image)),
            limiter: AdmissionLimiter::from_config(&config.image),
            store,
            text: config.text.clone(),
            pipeline: config.pipeline.clone(),
        }
    }

    /// The artifact store generations are written to.
    pub fn store(&self) -> &Arc<dyn ArtifactStore> {
        &self.store
    }

    /// Run the whole pipeline once.
    ///
    /// Never returns an error: failures are reported in the
    /// [`GenerationReport`] along with any partial results. The deadline
    /// covers the topic, outline and image stages; persistence is never
    /// cut short.
    #[instrument(skip(self), fields(topic_source = self.topics.source_name()))]
    pub async fn run(&self) -> GenerationReport {
        let mut report = GenerationReport::default();

        let acquired = match self.pipeline.timeout_secs {
            Some(secs) => {
                match tokio::time::timeout(Duration::from_secs(secs), self.acquire(&mut report)).await {
                    Ok(result) => result,
                    Err(_) => Err(PipelineError::new(PipelineErrorKind::DeadlineExceeded { secs })),
                }
            }
            None => self.acquire(&mut report).await,
        };

        let result = match acquired {
            Ok((topic, outline)) => self.persist(topic, outline, &mut report).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(location) => {
                info!(id = %location.id(), images = report.images.len(), "Generation persisted");
                report.location = Some(location);
                report.advance(PipelineState::Persisted);
            }
            Err(e) => {
                error!(
                    code = e.code(),
                    reached = %report.reached,
                    images = report.images.len(),
                    error = %e.kind,
                    "Generation failed"
                );
                report.state = PipelineState::Failed;
                report.error = Some(e);
            }
        }

        report
    }

    async fn acquire(
        &self,
        report: &mut GenerationReport,
    ) -> Result<(String, SlideDeckOutline), PipelineError> {
        let topic = self.topics.next_topic().await.map_err(into_topic_error)?;
        report.topic = Some(topic.clone());
        report.advance(PipelineState::TopicAcquired);

        let outline = self.request_outline(&topic).await?;
        report.images = GeneratedImages::with_slots(outline.slides.len());
        report.outline = Some(outline.clone());
        report.advance(PipelineState::OutlineAcquired);

        self.generate_images(&outline, &mut report.images).await?;
        report.advance(PipelineState::ImagesAcquired);

        Ok((topic, outline))
    }

    async fn persist(
        &self,
        topic: String,
        outline: SlideDeckOutline,
        report: &mut GenerationReport,
    ) -> Result<StoredLocation, PipelineError> {
        let generation = CompletedGeneration {
            topic,
            outline,
            images: std::mem::take(&mut report.images),
        };
        let stored = self.store.persist(&generation).await;
        report.images = generation.images;

        stored.map_err(|e| {
            error!(error = %e, "Failed to persist generation");
            PipelineError::new(PipelineErrorKind::PersistenceFailed(e.to_string()))
        })
    }

    /// Request and validate an outline for `topic`.
    #[instrument(skip(self))]
    pub async fn request_outline(&self, topic: &str) -> Result<SlideDeckOutline, PipelineError> {
        let mut prompt = PromptConfiguration::new(outline_prompt(topic, &self.pipeline), &self.text);
        if let Some(beta) = &self.text.beta {
            prompt = prompt.with_header(BETA_HEADER, beta);
        }

        let raw = self.outline_client.request_text(&prompt).await?;

        let outline = self.parser.parse(&raw).map_err(|failure| {
            error!(
                kind = %failure.kind,
                details = %failure.details,
                raw = %failure.raw,
                "Model output is not a valid outline"
            );
            PipelineError::new(PipelineErrorKind::OutlineParseFailed(failure))
        })?;

        debug!(
            slides = outline.slides.len(),
            images = outline.image_slide_count(),
            "Outline acquired"
        );
        Ok(outline.with_topic(topic))
    }

    /// Generate an image for every image slide of `outline` into `images`.
    ///
    /// Results land at their slide's index whatever order they finish in.
    /// On the first permanent failure the remaining requests are dropped and
    /// `images` keeps what had already arrived.
    #[instrument(skip(self, outline, images), fields(image_slides = outline.image_slide_count()))]
    pub async fn generate_images(
        &self,
        outline: &SlideDeckOutline,
        images: &mut GeneratedImages,
    ) -> Result<(), PipelineError> {
        let mut pending: FuturesUnordered<_> = outline
            .image_slides()
            .map(|(slide_index, slide)| {
                let description = slide.description().to_string();
                async move {
                    let Some(_guard) = self.limiter.acquire().await else {
                        return Err((slide_index, "admission limiter closed".to_string()));
                    };
                    self.images
                        .generate(slide_index, &description)
                        .await
                        .map_err(|e| (slide_index, e.to_string()))
                }
            })
            .collect();

        while let Some(result) = pending.next().await {
            match result {
                Ok(image) => {
                    debug!(slide_index = image.slide_index, "Image ready");
                    images.insert(image);
                }
                Err((slide_index, message)) => {
                    error!(slide_index, error = %message, "Image generation failed, abandoning run");
                    return Err(PipelineError::new(PipelineErrorKind::ImageGenerationFailed {
                        slide_index,
                        message,
                    }));
                }
            }
        }

        Ok(())
    }
}

fn into_topic_error(e: DeckhandError) -> PipelineError {
    match e.as_pipeline() {
        Some(pipeline) => pipeline.clone(),
        None => PipelineError::new(PipelineErrorKind::NoTopicAvailable(e.to_string())),
    }
}
