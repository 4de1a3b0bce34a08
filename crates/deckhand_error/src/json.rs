//! JSON encoding errors.

/// Serialization failure outside of model-output parsing (manifests,
/// HTTP bodies). Model output failures are reported as
/// [`ParseFailure`](crate::ParseFailure) instead.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} at line {} in {}", message, line, file)]
pub struct JsonError {
    /// Message from the underlying serializer
    pub message: String,
    /// Line number where the error was raised
    pub line: u32,
    /// File where the error was raised
    pub file: &'static str,
}

impl JsonError {
    /// Create a JSON error at the caller's location.
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
