//! Topic sources: ask the model, or draw from a pre-seeded pool.

use crate::{OutlineClient, PromptConfiguration, topic_prompt};
use async_trait::async_trait;
use deckhand_core::TextConfig;
use deckhand_error::{DeckhandResult, OutlineRequestFailure, PipelineError, PipelineErrorKind};
use deckhand_interface::TopicSource;
use rand::Rng;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Asks the text provider to name a topic.
#[derive(Clone)]
pub struct LlmTopicSource {
    client: OutlineClient,
    prompt: PromptConfiguration,
}

impl LlmTopicSource {
    /// Use `client` with the `[text]` section's sampling settings.
    pub fn new(client: OutlineClient, text: &TextConfig) -> Self {
        Self {
            client,
            prompt: PromptConfiguration::new(topic_prompt(), text),
        }
    }
}

#[async_trait]
impl TopicSource for LlmTopicSource {
    #[instrument(skip(self))]
    async fn next_topic(&self) -> DeckhandResult<String> {
        let text = self.client.request_text(&self.prompt).await.map_err(|e| match e.kind {
            PipelineErrorKind::OutlineRequestFailed(OutlineRequestFailure::UnexpectedContentKind(kind)) => {
                PipelineError::new(PipelineErrorKind::NoTopicAvailable(format!(
                    "model answered with {} instead of a topic",
                    kind
                )))
            }
            _ => e,
        })?;

        let topic = text.trim();
        if topic.is_empty() {
            warn!("Model returned a blank topic");
            return Err(PipelineError::new(PipelineErrorKind::NoTopicAvailable(
                "model returned a blank topic".to_string(),
            ))
            .into());
        }

        info!(topic, "Model chose topic");
        Ok(topic.to_string())
    }

    fn source_name(&self) -> &'static str {
        "llm"
    }
}

/// Draws topics from a newline-separated file, removing each one drawn.
///
/// Blank lines are ignored. Draws are uniform and serialised within the
/// process; the file is rewritten after every draw.
#[derive(Debug)]
pub struct TopicPool {
    path: PathBuf,
    lock: Mutex<()>,
}

impl TopicPool {
    /// Pool backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Topics left in the pool.
    pub async fn remaining(&self) -> DeckhandResult<Vec<String>> {
        let _guard = self.lock.lock().await;
        self.read_topics().await
    }

    async fn read_topics(&self) -> DeckhandResult<Vec<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(PipelineError::new(PipelineErrorKind::NoTopicAvailable(format!(
                "cannot read topic pool {}: {}",
                self.path.display(),
                e
            )))
            .into()),
        }
    }
}

#[async_trait]
impl TopicSource for TopicPool {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn next_topic(&self) -> DeckhandResult<String> {
        let _guard = self.lock.lock().await;

        let mut topics = self.read_topics().await?;
        if topics.is_empty() {
            warn!("Topic pool is empty");
            return Err(PipelineError::new(PipelineErrorKind::NoTopicAvailable(
                "topic pool is empty".to_string(),
            ))
            .into());
        }

        let index = rand::thread_rng().gen_range(0..topics.len());
        let topic = topics.remove(index);

        let mut contents = topics.join("\n");
        if !contents.is_empty() {
            contents.push('\n');
        }
        tokio::fs::write(&self.path, contents).await.map_err(|e| {
            PipelineError::new(PipelineErrorKind::NoTopicAvailable(format!(
                "cannot update topic pool {}: {}",
                self.path.display(),
                e
            )))
        })?;

        debug!(remaining = topics.len(), "Drew topic from pool");
        info!(topic = %topic, "Drew topic");
        Ok(topic)
    }

    fn source_name(&self) -> &'static str {
        "pool"
    }
}
