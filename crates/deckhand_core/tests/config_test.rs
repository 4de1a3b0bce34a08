//! Configuration loading tests.

use deckhand_core::{DeckhandConfig, ImageProviderKind, ImageResponseFormat, TopicSourceKind};
use std::io::Write;

#[test]
fn test_partial_file_falls_back_to_defaults() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("Temp file");
    writeln!(
        file,
        r#"
[image]
provider = "stability"
max_concurrent = 2
max_rate_limit_retries = 5

[pipeline]
timeout_secs = 120
"#
    )
    .expect("Write config");

    let config = DeckhandConfig::from_file(file.path()).expect("Config loads");

    assert_eq!(config.image.provider, ImageProviderKind::Stability);
    assert_eq!(config.image.max_concurrent, 2);
    assert_eq!(config.image.max_rate_limit_retries, Some(5));
    assert_eq!(config.image.default_reset_secs, 60);
    assert_eq!(config.image.response_format, ImageResponseFormat::Url);
    assert_eq!(config.pipeline.timeout_secs, Some(120));
    assert_eq!(config.pipeline.total_slides, 10);
    assert_eq!(config.text.max_tokens, 8000);
    assert_eq!(config.topic.source, TopicSourceKind::Llm);
}

#[test]
fn test_enum_spellings() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("Temp file");
    writeln!(
        file,
        r#"
[image]
response_format = "b64_json"

[topic]
source = "pool"
pool_path = "seed/topics.txt"
"#
    )
    .expect("Write config");

    let config = DeckhandConfig::from_file(file.path()).expect("Config loads");

    assert_eq!(config.image.response_format, ImageResponseFormat::B64Json);
    assert_eq!(config.topic.source, TopicSourceKind::Pool);
    assert_eq!(config.topic.pool_path.to_str(), Some("seed/topics.txt"));
}

#[test]
fn test_unknown_provider_is_config_error() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("Temp file");
    writeln!(file, "[image]\nprovider = \"midjourney\"").expect("Write config");

    let err = DeckhandConfig::from_file(file.path()).expect_err("Unknown provider rejected");
    assert!(format!("{}", err).contains("Configuration Error"));
}

#[test]
fn test_missing_file_is_error() {
    let dir = tempfile::tempdir().expect("Temp dir");
    assert!(DeckhandConfig::from_file(dir.path().join("absent.toml")).is_err());
}

#[test]
fn test_bundled_defaults_match_struct_defaults() {
    let config = DeckhandConfig::load().expect("Bundled defaults load");

    assert!(!config.text.model.is_empty());
    assert!(config.image.max_concurrent > 0);
    assert!(config.pipeline.max_text_slides <= config.pipeline.total_slides);
}
