//! Reset hints and remaining quota from 429 response headers.
//!
//! OpenAI reports image quota on `x-ratelimit-reset-images` and
//! `x-ratelimit-remaining-images`. Reset values are either plain seconds
//! (`"12"`, `"1.5"`) or Go-style durations (`"1m30s"`, `"250ms"`). The
//! generic `retry-after` header is used when the image-specific one is absent.

use deckhand_error::{ProviderError, ProviderErrorKind};
use reqwest::header::HeaderMap;
use std::time::Duration;
use tracing::{debug, instrument};

const RESET_HEADERS: [&str; 3] = [
    "x-ratelimit-reset-images",
    "x-ratelimit-reset-requests",
    "retry-after",
];

const REMAINING_HEADERS: [&str; 2] = [
    "x-ratelimit-remaining-images",
    "x-ratelimit-remaining-requests",
];

/// Rate-limit signals extracted from a response.
///
/// # Example
///
/// ```
/// use deckhand_rate_limit::RateLimitHeaders;
/// use reqwest::header::{HeaderMap, HeaderValue};
/// use std::time::Duration;
///
/// let mut headers = HeaderMap::new();
/// headers.insert("x-ratelimit-reset-images", HeaderValue::from_static("1m30s"));
/// headers.insert("x-ratelimit-remaining-images", HeaderValue::from_static("0"));
///
/// let limits = RateLimitHeaders::from_headers(&headers);
/// assert_eq!(limits.reset, Some(Duration::from_secs(90)));
/// assert_eq!(limits.remaining, Some(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RateLimitHeaders {
    /// Time until the quota resets
    pub reset: Option<Duration>,
    /// Requests left in the current window
    pub remaining: Option<u32>,
}

impl RateLimitHeaders {
    /// Read the first usable reset and remaining headers.
    #[instrument(skip(headers))]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let reset = RESET_HEADERS
            .iter()
            .find_map(|key| header_str(headers, key).and_then(parse_reset_hint));
        let remaining = REMAINING_HEADERS
            .iter()
            .find_map(|key| header_str(headers, key).and_then(|v| v.trim().parse().ok()));

        debug!(?reset, ?remaining, "Detected rate limit headers");
        Self { reset, remaining }
    }

    /// A retryable provider error carrying these signals.
    #[track_caller]
    pub fn into_error(self, message: impl Into<String>) -> ProviderError {
        ProviderError::new(ProviderErrorKind::RateLimited {
            retry_after: self.reset,
            remaining: self.remaining,
            message: message.into(),
        })
    }
}

fn header_str<'a>(headers: &'a HeaderMap, key: &str) -> Option<&'a str> {
    headers.get(key)?.to_str().ok()
}

/// Parse a reset hint: plain (possibly fractional) seconds or a Go duration.
///
/// Returns `None` for anything unparseable or negative.
///
/// # Example
///
/// ```
/// use deckhand_rate_limit::parse_reset_hint;
/// use std::time::Duration;
///
/// assert_eq!(parse_reset_hint("12"), Some(Duration::from_secs(12)));
/// assert_eq!(parse_reset_hint("1.5"), Some(Duration::from_millis(1500)));
/// assert_eq!(parse_reset_hint("250ms"), Some(Duration::from_millis(250)));
/// assert_eq!(parse_reset_hint("soon"), None);
/// ```
pub fn parse_reset_hint(value: &str) -> Option<Duration> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(secs) = value.parse::<f64>() {
        return Duration::try_from_secs_f64(secs).ok();
    }

    parse_go_duration(value)
}

fn parse_go_duration(value: &str) -> Option<Duration> {
    let mut total = 0f64;
    let mut rest = value;

    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if number_end == 0 {
            return None;
        }
        let number: f64 = rest[..number_end].parse().ok()?;
        rest = &rest[number_end..];

        let unit_end = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let scale = match &rest[..unit_end] {
            "h" => 3600.0,
            "m" => 60.0,
            "s" => 1.0,
            "ms" => 1e-3,
            "us" | "µs" => 1e-6,
            "ns" => 1e-9,
            _ => return None,
        };
        rest = &rest[unit_end..];
        total += number * scale;
    }

    Duration::try_from_secs_f64(total).ok()
}
