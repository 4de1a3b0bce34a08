//! Terminal failures of a generation pipeline run.
//!
//! A run that fails in any stage reports exactly one [`PipelineError`]. The
//! kind carries a stable machine-readable [`code`](PipelineErrorKind::code)
//! for HTTP callers and a human-readable `Display` for the `error` field.

/// Why the outline (or topic) request to the text provider failed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum OutlineRequestFailure {
    /// The first content block was not text
    #[display("expected text content, provider returned {}", _0)]
    UnexpectedContentKind(String),
    /// The provider call itself failed (transport, auth, status)
    #[display("provider error: {}", _0)]
    ProviderError(String),
}

/// Category of a model-output decoding failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ParseFailureKind {
    /// The text is not a JSON document
    #[display("malformed JSON")]
    MalformedJson,
    /// The JSON does not match the outline schema
    #[display("schema violation")]
    SchemaViolation,
}

/// Model output that could not be decoded into an outline.
///
/// The offending text is kept in `raw` so it can be logged for diagnosis.
///
/// # Examples
///
/// ```
/// use deckhand_error::{ParseFailure, ParseFailureKind};
///
/// let failure = ParseFailure::new(ParseFailureKind::MalformedJson, "expected value", "not json");
/// assert_eq!(failure.kind, ParseFailureKind::MalformedJson);
/// assert_eq!(failure.raw, "not json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{}: {}", kind, details)]
pub struct ParseFailure {
    /// Failure category
    pub kind: ParseFailureKind,
    /// Decoder message
    pub details: String,
    /// The raw model output that failed to decode
    pub raw: String,
}

impl ParseFailure {
    /// Create a parse failure.
    pub fn new(kind: ParseFailureKind, details: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            kind,
            details: details.into(),
            raw: raw.into(),
        }
    }
}

/// Terminal pipeline failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum PipelineErrorKind {
    /// Topic pool exhausted or model declined to name a topic
    #[display("No topic available: {}", _0)]
    NoTopicAvailable(String),
    /// Text provider request failed
    #[display("Outline request failed: {}", _0)]
    OutlineRequestFailed(OutlineRequestFailure),
    /// Model output was not a valid outline
    #[display("Outline parse failed: {}", _0)]
    OutlineParseFailed(ParseFailure),
    /// An image request failed with a non-retryable error
    #[display("Image generation failed for slide {}: {}", slide_index, message)]
    ImageGenerationFailed {
        /// Index of the slide in the outline
        slide_index: usize,
        /// Underlying failure
        message: String,
    },
    /// Writing the generation to storage failed
    #[display("Persistence failed: {}", _0)]
    PersistenceFailed(String),
    /// The overall run deadline elapsed
    #[display("Pipeline deadline of {}s exceeded", secs)]
    DeadlineExceeded {
        /// Configured deadline in seconds
        secs: u64,
    },
}

impl PipelineErrorKind {
    /// Stable snake_case reason code, e.g. `"outline_parse_failed"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use deckhand_error::PipelineErrorKind;
    ///
    /// let kind = PipelineErrorKind::NoTopicAvailable("topic pool is empty".into());
    /// assert_eq!(kind.code(), "no_topic_available");
    /// ```
    pub fn code(&self) -> &'static str {
        self.into()
    }
}

/// Pipeline error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The terminal condition
    pub kind: PipelineErrorKind,
    /// Line number where the error was raised
    pub line: u32,
    /// File where the error was raised
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new pipeline error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Stable reason code of the underlying kind.
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}
