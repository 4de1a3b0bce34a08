//! Decoding and validating model output into an outline.

use deckhand_core::{Slide, SlideDeckOutline};
use deckhand_error::{ParseFailure, ParseFailureKind};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

/// Validates raw model text against the outline schema.
///
/// The text must be a JSON document and nothing else; prose around it is a
/// `MalformedJson` failure. A document of the wrong shape is a
/// `SchemaViolation` naming the first offending slide.
///
/// # Example
///
/// ```
/// use deckhand_error::ParseFailureKind;
/// use deckhand_pipeline::OutlineParser;
///
/// let parser = OutlineParser::default();
///
/// let outline = parser.parse(r#"{"slides": [{"image": {"description": "A walrus"}}]}"#).unwrap();
/// assert_eq!(outline.image_slide_count(), 1);
///
/// let failure = parser.parse("not json").unwrap_err();
/// assert_eq!(failure.kind, ParseFailureKind::MalformedJson);
///
/// let failure = parser.parse(r#"{"slides": [{"foo": 1}]}"#).unwrap_err();
/// assert_eq!(failure.kind, ParseFailureKind::SchemaViolation);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineParser {
    max_title_slides: usize,
}

impl OutlineParser {
    /// A parser accepting at most `max_title_slides` title slides.
    pub fn new(max_title_slides: usize) -> Self {
        Self { max_title_slides }
    }

    /// Decode `raw` into an outline.
    #[instrument(skip(self, raw), fields(len = raw.len()))]
    pub fn parse(&self, raw: &str) -> Result<SlideDeckOutline, ParseFailure> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| ParseFailure::new(ParseFailureKind::MalformedJson, e.to_string(), raw))?;

        let violation = |details: String| ParseFailure::new(ParseFailureKind::SchemaViolation, details, raw);

        let object = value
            .as_object()
            .ok_or_else(|| violation("expected a JSON object at the top level".to_string()))?;

        let slides = object
            .get("slides")
            .ok_or_else(|| violation("missing required field `slides`".to_string()))?
            .as_array()
            .ok_or_else(|| violation("`slides` must be an array".to_string()))?;

        if slides.is_empty() {
            return Err(violation("`slides` must contain at least one slide".to_string()));
        }

        for (index, slide) in slides.iter().enumerate() {
            check_slide(slide).map_err(|details| violation(format!("slide {}: {}", index, details)))?;
        }

        let outline: SlideDeckOutline =
            serde_json::from_value(value).map_err(|e| violation(e.to_string()))?;

        let titles = outline.title_slide_count();
        if titles > self.max_title_slides {
            return Err(violation(format!(
                "{} title slides exceeds the limit of {}",
                titles, self.max_title_slides
            )));
        }

        debug!(
            slides = outline.slides.len(),
            images = outline.image_slide_count(),
            titles,
            "Parsed outline"
        );
        Ok(outline)
    }
}

impl Default for OutlineParser {
    fn default() -> Self {
        Self::new(3)
    }
}

fn check_slide(value: &Value) -> Result<(), String> {
    let Some(object) = value.as_object() else {
        return Err("expected an object".to_string());
    };
    if object.contains_key("image") && object.contains_key("title") {
        return Err("a slide is either a title slide or an image slide, not both".to_string());
    }
    Slide::deserialize(value).map(|_| ()).map_err(|_| {
        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        format!(
            "expected {{title, presenter}} or {{image: {{description}}}}, found keys {:?}",
            keys
        )
    })
}
