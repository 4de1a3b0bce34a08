//! Top-level error wrapper types.

use crate::{
    BuilderError, ConfigError, JsonError, PipelineError, ProviderError, RetryableError,
    StorageError,
};
use std::time::Duration;

/// Every error family in the workspace.
///
/// # Examples
///
/// ```
/// use deckhand_error::{DeckhandError, ConfigError};
///
/// let err: DeckhandError = ConfigError::new("missing [image] section").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum DeckhandErrorKind {
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Text or image provider error
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Artifact storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Terminal pipeline failure
    #[from(PipelineError)]
    Pipeline(PipelineError),
}

/// Deckhand error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Deckhand Error: {}", _0)]
pub struct DeckhandError(Box<DeckhandErrorKind>);

impl DeckhandError {
    /// Create a new error from a kind.
    pub fn new(kind: DeckhandErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &DeckhandErrorKind {
        &self.0
    }

    /// The provider error inside, if this error came from a provider.
    pub fn as_provider(&self) -> Option<&ProviderError> {
        match self.kind() {
            DeckhandErrorKind::Provider(err) => Some(err),
            _ => None,
        }
    }

    /// The pipeline error inside, if this error is a terminal pipeline failure.
    pub fn as_pipeline(&self) -> Option<&PipelineError> {
        match self.kind() {
            DeckhandErrorKind::Pipeline(err) => Some(err),
            _ => None,
        }
    }
}

impl<T> From<T> for DeckhandError
where
    T: Into<DeckhandErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

impl RetryableError for DeckhandError {
    fn is_retryable(&self) -> bool {
        self.as_provider().is_some_and(RetryableError::is_retryable)
    }

    fn retry_after(&self) -> Option<Duration> {
        self.as_provider().and_then(RetryableError::retry_after)
    }
}

/// Result type for Deckhand operations.
///
/// # Examples
///
/// ```
/// use deckhand_error::{DeckhandResult, StorageError, StorageErrorKind};
///
/// fn write_manifest() -> DeckhandResult<()> {
///     Err(StorageError::new(StorageErrorKind::FileWrite("slides.json".into())))?
/// }
///
/// assert!(write_manifest().is_err());
/// ```
pub type DeckhandResult<T> = std::result::Result<T, DeckhandError>;
