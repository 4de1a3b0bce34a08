//! Hand-written provider fakes shared by the pipeline tests.

#![allow(dead_code)]

use async_trait::async_trait;
use deckhand_core::{
    CatalogEntry, CompletedGeneration, GenerateRequest, GenerateResponse, ImagePayload, ImageRequest,
    Output, StoredLocation,
};
use deckhand_error::{DeckhandResult, ProviderError, ProviderErrorKind};
use deckhand_interface::{ArtifactStore, ImageDriver, TextDriver, TopicSource};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Text driver answering from a script, recording every request.
#[derive(Default)]
pub struct ScriptedTextDriver {
    responses: Mutex<VecDeque<DeckhandResult<GenerateResponse>>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedTextDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(self, text: &str) -> Self {
        self.with_response(Ok(GenerateResponse {
            outputs: vec![Output::Text(text.to_string())],
        }))
    }

    pub fn with_response(self, response: DeckhandResult<GenerateResponse>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextDriver for ScriptedTextDriver {
    async fn generate(&self, req: &GenerateRequest) -> DeckhandResult<GenerateResponse> {
        self.requests.lock().unwrap().push(req.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(ProviderError::new(ProviderErrorKind::Api {
                    status: 500,
                    message: "script exhausted".to_string(),
                })
                .into())
            })
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

/// Image driver whose behaviour is keyed by description.
///
/// Successful images carry the description's bytes so tests can check which
/// slide each image came from.
#[derive(Default)]
pub struct FakeImageDriver {
    delays: HashMap<String, Duration>,
    failing: HashSet<String>,
    rate_limits_before_success: usize,
    reset_hint: Option<Duration>,
    hosted: bool,
    download_failures: usize,
    download_unsupported: bool,
    calls: Mutex<HashMap<String, usize>>,
    downloads: AtomicUsize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl FakeImageDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, description: &str, delay: Duration) -> Self {
        self.delays.insert(description.to_string(), delay);
        self
    }

    pub fn failing_on(mut self, description: &str) -> Self {
        self.failing.insert(description.to_string());
        self
    }

    /// Answer 429 this many times per description before succeeding.
    pub fn rate_limited(mut self, times: usize, reset_hint: Option<Duration>) -> Self {
        self.rate_limits_before_success = times;
        self.reset_hint = reset_hint;
        self
    }

    pub fn hosted(mut self) -> Self {
        self.hosted = true;
        self
    }

    pub fn with_download_failures(mut self, times: usize) -> Self {
        self.download_failures = times;
        self
    }

    pub fn with_unsupported_download(mut self) -> Self {
        self.download_unsupported = true;
        self
    }

    pub fn calls(&self, description: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(description)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    pub fn downloads(&self) -> usize {
        self.downloads.load(Ordering::SeqCst)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageDriver for FakeImageDriver {
    async fn generate_image(&self, req: &ImageRequest) -> DeckhandResult<ImagePayload> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(&req.description) {
            tokio::time::sleep(*delay).await;
        }

        let call = {
            let mut calls = self.calls.lock().unwrap();
            let count = calls.entry(req.description.clone()).or_insert(0);
            *count += 1;
            *count
        };
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if call <= self.rate_limits_before_success {
            return Err(ProviderError::new(ProviderErrorKind::RateLimited {
                retry_after: self.reset_hint,
                remaining: Some(0),
                message: "Rate limit exceeded for images per minute".to_string(),
            })
            .into());
        }

        if self.failing.contains(&req.description) {
            return Err(ProviderError::new(ProviderErrorKind::Api {
                status: 400,
                message: "content policy violation".to_string(),
            })
            .into());
        }

        if self.hosted {
            Ok(ImagePayload::Url(format!("https://images.test/{}", req.description)))
        } else {
            Ok(ImagePayload::Bytes {
                mime: "image/png".to_string(),
                data: req.description.as_bytes().to_vec(),
            })
        }
    }

    async fn download(&self, url: &str) -> DeckhandResult<(String, Vec<u8>)> {
        let attempt = self.downloads.fetch_add(1, Ordering::SeqCst) + 1;

        if self.download_unsupported {
            return Err(ProviderError::new(ProviderErrorKind::UnsupportedOutput(url.to_string())).into());
        }
        if attempt <= self.download_failures {
            return Err(ProviderError::new(ProviderErrorKind::Download("HTTP 503".to_string())).into());
        }

        let description = url.trim_start_matches("https://images.test/");
        Ok(("image/jpeg".to_string(), description.as_bytes().to_vec()))
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-image-model"
    }
}

/// Always returns the same topic.
pub struct StaticTopic(pub &'static str);

#[async_trait]
impl TopicSource for StaticTopic {
    async fn next_topic(&self) -> DeckhandResult<String> {
        Ok(self.0.to_string())
    }

    fn source_name(&self) -> &'static str {
        "static"
    }
}

/// Store that finishes writing, then stalls before reporting back.
pub struct SlowStore {
    inner: Arc<dyn ArtifactStore>,
    stall: Duration,
}

impl SlowStore {
    pub fn new(inner: Arc<dyn ArtifactStore>, stall: Duration) -> Self {
        Self { inner, stall }
    }
}

#[async_trait]
impl ArtifactStore for SlowStore {
    async fn persist(&self, generation: &CompletedGeneration) -> DeckhandResult<StoredLocation> {
        let location = self.inner.persist(generation).await?;
        tokio::time::sleep(self.stall).await;
        Ok(location)
    }

    async fn list_all(&self) -> DeckhandResult<Vec<CatalogEntry>> {
        self.inner.list_all().await
    }
}

/// Outline JSON with one image slide per description, after an optional title slide.
pub fn outline_json(with_title: bool, descriptions: &[&str]) -> String {
    let mut slides = Vec::new();
    if with_title {
        slides.push(serde_json::json!({
            "title": {"content": "Deck"},
            "presenter": {"name": "Pat Presenter", "title": "Chief Improviser"}
        }));
    }
    for description in descriptions {
        slides.push(serde_json::json!({"image": {"description": description}}));
    }
    serde_json::json!({"slides": slides}).to_string()
}
