//! Reset hint and header detection tests.

use deckhand_error::{ProviderErrorKind, RetryableError};
use deckhand_rate_limit::{RateLimitHeaders, parse_reset_hint};
use reqwest::header::{HeaderMap, HeaderValue};
use std::time::Duration;

#[test]
fn test_plain_seconds() {
    assert_eq!(parse_reset_hint("60"), Some(Duration::from_secs(60)));
    assert_eq!(parse_reset_hint(" 2 "), Some(Duration::from_secs(2)));
    assert_eq!(parse_reset_hint("0.25"), Some(Duration::from_millis(250)));
}

#[test]
fn test_go_durations() {
    assert_eq!(parse_reset_hint("1m30s"), Some(Duration::from_secs(90)));
    assert_eq!(parse_reset_hint("6m0s"), Some(Duration::from_secs(360)));
    assert_eq!(parse_reset_hint("1h"), Some(Duration::from_secs(3600)));
    assert_eq!(parse_reset_hint("1.5s"), Some(Duration::from_millis(1500)));
    assert_eq!(parse_reset_hint("120ms"), Some(Duration::from_millis(120)));
}

#[test]
fn test_unparseable_hints() {
    assert_eq!(parse_reset_hint(""), None);
    assert_eq!(parse_reset_hint("-5"), None);
    assert_eq!(parse_reset_hint("3 fortnights"), None);
    assert_eq!(parse_reset_hint("ms"), None);
    assert_eq!(parse_reset_hint("10x"), None);
}

#[test]
fn test_image_header_wins_over_retry_after() {
    let mut headers = HeaderMap::new();
    headers.insert("retry-after", HeaderValue::from_static("30"));
    headers.insert("x-ratelimit-reset-images", HeaderValue::from_static("12"));

    let limits = RateLimitHeaders::from_headers(&headers);
    assert_eq!(limits.reset, Some(Duration::from_secs(12)));
    assert_eq!(limits.remaining, None);
}

#[test]
fn test_retry_after_fallback() {
    let mut headers = HeaderMap::new();
    headers.insert("retry-after", HeaderValue::from_static("7"));

    let limits = RateLimitHeaders::from_headers(&headers);
    assert_eq!(limits.reset, Some(Duration::from_secs(7)));
}

#[test]
fn test_garbage_reset_header_falls_through() {
    let mut headers = HeaderMap::new();
    headers.insert("x-ratelimit-reset-images", HeaderValue::from_static("later"));

    assert_eq!(RateLimitHeaders::from_headers(&headers), RateLimitHeaders::default());
}

#[test]
fn test_into_error_is_retryable() {
    let mut headers = HeaderMap::new();
    headers.insert("x-ratelimit-reset-images", HeaderValue::from_static("2"));
    headers.insert("x-ratelimit-remaining-images", HeaderValue::from_static("0"));

    let err = RateLimitHeaders::from_headers(&headers).into_error("Too many requests");

    assert!(err.is_retryable());
    assert_eq!(err.retry_after(), Some(Duration::from_secs(2)));
    match err.kind {
        ProviderErrorKind::RateLimited { remaining, .. } => assert_eq!(remaining, Some(0)),
        other => panic!("Expected RateLimited, got {:?}", other),
    }
}
