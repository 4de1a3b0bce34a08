//! Outline decoding and validation.

use deckhand_core::Slide;
use deckhand_error::ParseFailureKind;
use deckhand_pipeline::OutlineParser;

#[test]
fn test_mixed_outline_parses_in_order() {
    let raw = r#"{
        "slides": [
            {"title": {"content": "Wealthy Chimpanzees"}, "presenter": {"name": "Dr. Bonzo", "title": "Primate Economist"}},
            {"image": {"description": "A chimp in a top hat counting coins"}},
            {"image": {"description": "In conclusion, bananas are currency"}}
        ]
    }"#;

    let outline = OutlineParser::default().parse(raw).unwrap();

    assert_eq!(outline.slides.len(), 3);
    assert!(matches!(outline.slides[0], Slide::Title(_)));
    let indices: Vec<usize> = outline.image_slides().map(|(index, _)| index).collect();
    assert_eq!(indices, vec![1, 2]);
    assert!(outline.topic.is_empty());
}

#[test]
fn test_not_json_is_malformed() {
    let failure = OutlineParser::default().parse("not json").unwrap_err();

    assert_eq!(failure.kind, ParseFailureKind::MalformedJson);
    assert_eq!(failure.raw, "not json");
}

#[test]
fn test_prose_around_json_is_malformed() {
    let raw = r#"Here is your deck: {"slides": [{"image": {"description": "A yak"}}]}"#;

    let failure = OutlineParser::default().parse(raw).unwrap_err();

    assert_eq!(failure.kind, ParseFailureKind::MalformedJson);
}

#[test]
fn test_unknown_slide_shape_is_schema_violation() {
    let failure = OutlineParser::default()
        .parse(r#"{"slides": [{"foo": 1}]}"#)
        .unwrap_err();

    assert_eq!(failure.kind, ParseFailureKind::SchemaViolation);
    assert!(failure.details.contains("slide 0"), "{}", failure.details);
    assert!(failure.details.contains("foo"), "{}", failure.details);
}

#[test]
fn test_slide_with_both_shapes_is_schema_violation() {
    let raw = r#"{"slides": [
        {"image": {"description": "fine"}},
        {"image": {"description": "x"}, "title": {"content": "y"}, "presenter": {"name": "a", "title": "b"}}
    ]}"#;

    let failure = OutlineParser::default().parse(raw).unwrap_err();

    assert_eq!(failure.kind, ParseFailureKind::SchemaViolation);
    assert!(failure.details.contains("slide 1"), "{}", failure.details);
}

#[test]
fn test_missing_or_empty_slides_is_schema_violation() {
    let parser = OutlineParser::default();

    for raw in [r#"{}"#, r#"{"slides": []}"#, r#"{"slides": "many"}"#, r#"[1, 2]"#] {
        let failure = parser.parse(raw).unwrap_err();
        assert_eq!(failure.kind, ParseFailureKind::SchemaViolation, "input {}", raw);
    }
}

#[test]
fn test_title_slide_cap_is_enforced() {
    let title = r#"{"title": {"content": "T"}, "presenter": {"name": "N", "title": "P"}}"#;
    let raw = format!(
        r#"{{"slides": [{title}, {title}, {{"image": {{"description": "closing"}}}}]}}"#
    );

    assert!(OutlineParser::new(2).parse(&raw).is_ok());

    let failure = OutlineParser::new(1).parse(&raw).unwrap_err();
    assert_eq!(failure.kind, ParseFailureKind::SchemaViolation);
}

#[test]
fn test_optional_deck_title_and_presenter_are_kept() {
    let raw = r#"{
        "title": {"content": "Moon Real Estate"},
        "presenter": {"name": "Luna Vega", "title": "Crater Broker"},
        "slides": [{"image": {"description": "A condo on the moon"}}]
    }"#;

    let outline = OutlineParser::default().parse(raw).unwrap();

    assert_eq!(outline.title.unwrap().content, "Moon Real Estate");
    assert_eq!(outline.presenter.unwrap().name, "Luna Vega");
}
