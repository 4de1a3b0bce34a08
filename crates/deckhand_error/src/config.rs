//! Configuration error types.

/// Raised when layered configuration cannot be built or deserialized,
/// or when a required setting (such as a credential) is absent.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// What went wrong
    pub message: String,
    /// Line number where the error was raised
    pub line: u32,
    /// File where the error was raised
    pub file: &'static str,
}

impl ConfigError {
    /// Create a configuration error at the caller's location.
    ///
    /// # Examples
    ///
    /// ```
    /// use deckhand_error::ConfigError;
    ///
    /// let err = ConfigError::new("unknown image provider: midjourney");
    /// assert!(err.message.contains("midjourney"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
