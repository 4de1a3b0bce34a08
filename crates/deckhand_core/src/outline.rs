//! The slide deck outline returned by the language model.

use serde::{Deserialize, Serialize};

/// Title text shown on a title slide or at the top of a deck.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TitleText {
    /// The title itself
    pub content: String,
}

/// A made-up presenter introduced on a title slide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Presenter {
    /// Presenter name
    pub name: String,
    /// Job title or career accomplishment
    pub title: String,
}

/// A natural-language prompt for the image generator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageDescription {
    /// What the image should depict, including any overlaid text
    pub description: String,
}

/// A slide introducing the deck title and presenter. No image is generated for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TitleSlide {
    /// Deck title
    pub title: TitleText,
    /// Presenter introduced by the slide
    pub presenter: Presenter,
}

/// A slide rendered entirely from a generated image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageSlide {
    /// Prompt for the image generator
    pub image: ImageDescription,
}

impl ImageSlide {
    /// The image prompt.
    pub fn description(&self) -> &str {
        &self.image.description
    }
}

/// One deck entry: exactly one of a title slide or an image slide.
///
/// The JSON form has no discriminator field; a slide is a title slide when it
/// carries `title` and `presenter`, and an image slide when it carries `image`.
/// Any other shape fails to decode.
///
/// # Examples
///
/// ```
/// use deckhand_core::Slide;
///
/// let slide: Slide = serde_json::from_str(r#"{"image": {"description": "A flamingo in a lounge"}}"#).unwrap();
/// assert!(slide.as_image().is_some());
///
/// assert!(serde_json::from_str::<Slide>(r#"{"foo": 1}"#).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Slide {
    /// Title and presenter slide
    Title(TitleSlide),
    /// Image-description slide
    Image(ImageSlide),
}

impl Slide {
    /// The image slide, if this is one.
    pub fn as_image(&self) -> Option<&ImageSlide> {
        match self {
            Slide::Image(slide) => Some(slide),
            Slide::Title(_) => None,
        }
    }

    /// Whether this is a title slide.
    pub fn is_title(&self) -> bool {
        matches!(self, Slide::Title(_))
    }
}

/// The structured plan for one deck.
///
/// `slides` is in presentation order. The final slide is the closing slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideDeckOutline {
    /// Freeform subject line. Not produced by the model; filled in by the pipeline.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub topic: String,
    /// Optional deck title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<TitleText>,
    /// Optional deck presenter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presenter: Option<Presenter>,
    /// Slides in presentation order
    pub slides: Vec<Slide>,
}

impl SlideDeckOutline {
    /// Attach the topic this outline was generated for.
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    /// Image slides together with their index in `slides`.
    pub fn image_slides(&self) -> impl Iterator<Item = (usize, &ImageSlide)> {
        self.slides
            .iter()
            .enumerate()
            .filter_map(|(index, slide)| slide.as_image().map(|image| (index, image)))
    }

    /// Number of image slides.
    pub fn image_slide_count(&self) -> usize {
        self.image_slides().count()
    }

    /// Number of title slides.
    pub fn title_slide_count(&self) -> usize {
        self.slides.iter().filter(|slide| slide.is_title()).count()
    }

    /// The closing slide (last in presentation order).
    pub fn closing_slide(&self) -> Option<&Slide> {
        self.slides.last()
    }
}
