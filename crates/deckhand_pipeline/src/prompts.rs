//! Prompts sent to the text provider.

use deckhand_core::PipelineConfig;

/// JSON schema embedded in the outline prompt.
pub const OUTLINE_SCHEMA: &str = r#"{
  "$schema": "https://json-schema.org/draft/2020-12/schema",
  "type": "object",
  "properties": {
    "title": {
      "type": "object",
      "properties": { "content": { "type": "string" } },
      "required": ["content"]
    },
    "presenter": {
      "type": "object",
      "properties": {
        "name": { "type": "string" },
        "title": { "type": "string" }
      },
      "required": ["name", "title"]
    },
    "slides": {
      "type": "array",
      "items": {
        "type": "object",
        "oneOf": [
          {
            "properties": {
              "title": {
                "type": "object",
                "properties": { "content": { "type": "string" } },
                "required": ["content"]
              },
              "presenter": {
                "type": "object",
                "properties": {
                  "name": { "type": "string" },
                  "title": { "type": "string" }
                },
                "required": ["name", "title"]
              }
            },
            "required": ["title", "presenter"],
            "unevaluatedProperties": false
          },
          {
            "properties": {
              "image": {
                "type": "object",
                "properties": { "description": { "type": "string" } },
                "required": ["description"]
              }
            },
            "required": ["image"],
            "unevaluatedProperties": false
          }
        ]
      },
      "minItems": 1
    }
  },
  "required": ["slides"]
}"#;

/// Prompt asking for a single deck topic and nothing else.
pub fn topic_prompt() -> String {
    "You are an expert improvisational slide deck creator. \
     Come up with the topic for a random slide deck. \
     Tell me only the topic, not anything else. Do not include a prelude, an explanation, \
     or anything other than the topic itself.\n\n\
     <example>\nThe Habits of Wealthy Chimpanzees\n</example>"
        .to_string()
}

/// Prompt asking for a JSON outline of a deck about `topic`.
///
/// # Example
///
/// ```
/// use deckhand_core::PipelineConfig;
/// use deckhand_pipeline::outline_prompt;
///
/// let prompt = outline_prompt("Lunar Real Estate", &PipelineConfig::default());
/// assert!(prompt.contains(r#"The presentation topic is "Lunar Real Estate"."#));
/// assert!(prompt.contains("Generate 10 slides"));
/// ```
pub fn outline_prompt(topic: &str, config: &PipelineConfig) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "You are an expert improvisational slide deck creator. \
         Generate the outline for a random slide deck. \
         The slide deck should be pretty barebones to allow a presenter to improvise their way through. \
         This slide deck will be used in improv competitions, so it should not be continuous in topic \
         from slide to slide. Ensure that there are a few completely surprising left turns to keep things \
         dynamic. The slides should not tell the whole story in order to leave room for the improviser to \
         justify the slides contents.\n\n",
    );

    prompt.push_str(&format!("The presentation topic is \"{}\".\n\n", topic));

    prompt.push_str(&format!(
        "Focus more heavily on images instead of text on the slides. Any text you generate should be \
         overlaid onto images. Assume that the image URLs will be provided elsewhere, but describe them in \
         the JSON format I describe below. Only up to {} slides should contain text (you will need to \
         specify the text in the image prompts).\n",
        config.max_text_slides
    ));

    if config.opening_title_slide {
        prompt.push_str(
            "Ensure the first slide has the title along with a made-up name and a description of that \
             person's job title or career accomplishments.\n",
        );
    }

    if !config.avoid_subjects.is_empty() {
        prompt.push_str(&format!(
            "Avoid these subjects: {}.\n",
            config.avoid_subjects.join(", ")
        ));
    }

    prompt.push_str("The last slide should contain the words \"in conclusion\" and a random image.\n");
    prompt.push_str(&format!(
        "Generate {} slides, including the slides I've already described.\n\n",
        config.total_slides
    ));

    prompt.push_str(
        "Output in JSON format using the following schema. Do NOT provide any context, prelude, or \
         explanation; only give back the JSON.\n```\n",
    );
    prompt.push_str(OUTLINE_SCHEMA);
    prompt.push_str("\n```\n");

    prompt
}
