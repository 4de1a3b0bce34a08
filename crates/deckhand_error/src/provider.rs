//! Errors raised by text and image generation providers.

use std::time::Duration;

/// Provider failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ProviderErrorKind {
    /// Credential environment variable not set
    #[display("{} environment variable not set", _0)]
    MissingApiKey(String),
    /// Transport-level failure (connect, TLS, timeout)
    #[display("HTTP request failed: {}", _0)]
    Http(String),
    /// Provider answered with a non-success status
    #[display("HTTP {} error: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or provider message
        message: String,
    },
    /// Provider signalled a 429-class quota exhaustion
    #[display("Rate limited (reset hint {:?}, remaining {:?}): {}", retry_after, remaining, message)]
    RateLimited {
        /// Provider-supplied time until the quota resets
        retry_after: Option<Duration>,
        /// Provider-supplied remaining request count
        remaining: Option<u32>,
        /// Response body or provider message
        message: String,
    },
    /// Provider response could not be decoded
    #[display("Failed to parse provider response: {}", _0)]
    Parse(String),
    /// Fetching a provider-hosted image failed
    #[display("Failed to download generated image: {}", _0)]
    Download(String),
    /// Provider returned a payload shape this client cannot use
    #[display("Unsupported provider output: {}", _0)]
    UnsupportedOutput(String),
}

impl ProviderErrorKind {
    /// Whether a caller may retry the identical request later.
    ///
    /// Only quota exhaustion qualifies. Authentication, validation and
    /// server errors propagate immediately.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProviderErrorKind::RateLimited { .. })
    }

    /// The provider's reset hint, if this is a rate-limit signal that carried one.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            ProviderErrorKind::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

/// Provider error with source location tracking.
///
/// # Examples
///
/// ```
/// use deckhand_error::{ProviderError, ProviderErrorKind, RetryableError};
/// use std::time::Duration;
///
/// let err = ProviderError::new(ProviderErrorKind::RateLimited {
///     retry_after: Some(Duration::from_secs(12)),
///     remaining: Some(0),
///     message: "Rate limit exceeded for images per minute".to_string(),
/// });
///
/// assert!(err.is_retryable());
/// assert_eq!(err.retry_after(), Some(Duration::from_secs(12)));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    /// The kind of error that occurred
    pub kind: ProviderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new provider error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Errors that know whether they are worth retrying.
///
/// Rate-limit backoff in the image client is driven entirely by this trait,
/// so fakes in tests only need to produce a retryable error to exercise it.
pub trait RetryableError {
    /// Returns true if the failed request may be issued again unchanged.
    fn is_retryable(&self) -> bool;

    /// Provider hint for how long to wait before retrying.
    ///
    /// `None` means the provider gave no hint and the caller should fall
    /// back to its configured default window.
    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

impl RetryableError for ProviderError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    fn retry_after(&self) -> Option<Duration> {
        self.kind.retry_after()
    }
}
