//! Generated image payloads and their per-slide collection.

use crate::SlideDeckOutline;
use serde::{Deserialize, Serialize};

/// A request for one image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRequest {
    /// Natural-language description of the image
    pub description: String,
}

impl ImageRequest {
    /// Request an image for the given description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// What an image provider hands back.
///
/// URL payloads are short-lived and must be downloaded before the pipeline
/// run ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePayload {
    /// Inline image bytes
    Bytes {
        /// MIME type reported by the provider
        mime: String,
        /// Encoded image data
        data: Vec<u8>,
    },
    /// Provider-hosted image location
    Url(String),
}

/// A downloaded image keyed by the index of the slide that described it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Index of the originating slide in the outline
    pub slide_index: usize,
    /// MIME type of `data`
    pub mime_type: String,
    /// Encoded image data
    pub data: Vec<u8>,
    /// The ephemeral provider URL the data came from, if any
    pub source_url: Option<String>,
}

impl GeneratedImage {
    /// File extension matching the MIME type, defaulting to `png`.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "png",
        }
    }
}

/// Generated images placed at their slide's index.
///
/// Images arrive in completion order from concurrent requests; this container
/// puts each one back at its originating slide so iteration is always in
/// presentation order.
///
/// # Examples
///
/// ```
/// use deckhand_core::{GeneratedImage, GeneratedImages};
///
/// let mut images = GeneratedImages::with_slots(3);
/// for index in [2, 0] {
///     images.insert(GeneratedImage {
///         slide_index: index,
///         mime_type: "image/png".into(),
///         data: vec![index as u8],
///         source_url: None,
///     });
/// }
///
/// let order: Vec<usize> = images.iter().map(|image| image.slide_index).collect();
/// assert_eq!(order, vec![0, 2]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedImages {
    slots: Vec<Option<GeneratedImage>>,
}

impl GeneratedImages {
    /// An empty collection with one slot per slide.
    pub fn with_slots(slide_count: usize) -> Self {
        Self {
            slots: (0..slide_count).map(|_| None).collect(),
        }
    }

    /// Place an image at its slide index, returning any image it replaced.
    pub fn insert(&mut self, image: GeneratedImage) -> Option<GeneratedImage> {
        let index = image.slide_index;
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || None);
        }
        self.slots[index].replace(image)
    }

    /// The image for a slide, if one has been generated.
    pub fn get(&self, slide_index: usize) -> Option<&GeneratedImage> {
        self.slots.get(slide_index).and_then(Option::as_ref)
    }

    /// Images in slide order.
    pub fn iter(&self) -> impl Iterator<Item = &GeneratedImage> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// Number of images held.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether no image has been generated yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Indices of image slides in `outline` that have no image yet.
    pub fn missing_for(&self, outline: &SlideDeckOutline) -> Vec<usize> {
        outline
            .image_slides()
            .map(|(index, _)| index)
            .filter(|index| self.get(*index).is_none())
            .collect()
    }

    /// Consume the collection, yielding images in slide order.
    pub fn into_vec(self) -> Vec<GeneratedImage> {
        self.slots.into_iter().flatten().collect()
    }
}
