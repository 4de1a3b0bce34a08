//! JSON bodies returned by the HTTP API.

use deckhand_core::GeneratedImage;
use deckhand_pipeline::{GenerationReport, PipelineState};
use serde::{Deserialize, Serialize};

/// One produced image, without its bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSummary {
    /// Index of the slide the image belongs to
    pub slide_index: usize,
    /// MIME type
    pub mime_type: String,
    /// Encoded size in bytes
    pub size: usize,
    /// Ephemeral provider URL the image was downloaded from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl From<&GeneratedImage> for ImageSummary {
    fn from(image: &GeneratedImage) -> Self {
        Self {
            slide_index: image.slide_index,
            mime_type: image.mime_type.clone(),
            size: image.data.len(),
            source_url: image.source_url.clone(),
        }
    }
}

/// Response to `POST /generate`.
///
/// `image_urls` is only filled once the generation is stored. When `error`
/// is present, `images` lists whatever was produced before the failure and
/// must not be assumed complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationBody {
    /// Final pipeline state
    pub state: PipelineState,
    /// Last state reached before stopping
    pub reached: PipelineState,
    /// Chosen topic
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Stored generation id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Served image locations, in slide order
    pub image_urls: Vec<String>,
    /// Produced images, in slide order
    pub images: Vec<ImageSummary>,
    /// Human-readable failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Stable failure code, e.g. `image_generation_failed`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<&GenerationReport> for GenerationBody {
    fn from(report: &GenerationReport) -> Self {
        let image_urls = report
            .location
            .as_ref()
            .map(|location| {
                location
                    .image_paths()
                    .iter()
                    .map(|path| format!("/logs/{}", path))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            state: report.state,
            reached: report.reached,
            topic: report.topic.clone(),
            id: report.location.as_ref().map(|location| location.id().clone()),
            image_urls,
            images: report.images.iter().map(ImageSummary::from).collect(),
            error: report.error.as_ref().map(|e| e.kind.to_string()),
            reason: report.error.as_ref().map(|e| e.code().to_string()),
        }
    }
}

/// Error body for non-pipeline failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable failure
    pub error: String,
}
