//! The `slides.json` manifest.

use deckhand_core::{Presenter, Slide, TitleSlide, TitleText};
use serde::{Deserialize, Serialize};

/// An image slide as stored: its prompt and where its image landed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredImage {
    /// Prompt the image was generated from
    pub description: String,
    /// Image path relative to the storage root
    pub path: String,
}

/// One slide in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredSlide {
    /// Title and presenter slide
    Title(TitleSlide),
    /// Image slide with its stored image
    Image {
        /// Prompt and path
        image: StoredImage,
    },
}

/// Contents of `slides.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Raw topic text
    #[serde(default)]
    pub topic: String,
    /// Deck title
    #[serde(default)]
    pub title: Option<TitleText>,
    /// Deck presenter
    #[serde(default)]
    pub presenter: Option<Presenter>,
    /// Slides in presentation order
    pub slides: Vec<StoredSlide>,
}

impl Manifest {
    /// Image paths in slide order.
    pub fn image_paths(&self) -> Vec<String> {
        self.slides
            .iter()
            .filter_map(|slide| match slide {
                StoredSlide::Image { image } => Some(image.path.clone()),
                StoredSlide::Title(_) => None,
            })
            .collect()
    }
}

impl StoredSlide {
    /// Store a title slide as is, or pair an image slide with its path.
    pub fn from_slide(slide: &Slide, path: Option<String>) -> Option<Self> {
        match (slide, path) {
            (Slide::Title(title), _) => Some(StoredSlide::Title(title.clone())),
            (Slide::Image(image), Some(path)) => Some(StoredSlide::Image {
                image: StoredImage {
                    description: image.description().to_string(),
                    path,
                },
            }),
            (Slide::Image(_), None) => None,
        }
    }
}
