//! Artifact storage error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create a generation or image directory
    #[display("Failed to create storage directory: {}", _0)]
    DirectoryCreation(String),
    /// A generation directory with the same key already exists
    #[display("Generation directory already exists: {}", _0)]
    AlreadyExists(String),
    /// Failed to write a file
    #[display("Failed to write file: {}", _0)]
    FileWrite(String),
    /// Failed to read a file
    #[display("Failed to read file: {}", _0)]
    FileRead(String),
    /// Manifest could not be encoded or decoded
    #[display("Invalid manifest: {}", _0)]
    Manifest(String),
    /// An image slide has no generated image to store
    #[display("Generation is incomplete: {}", _0)]
    IncompleteGeneration(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use deckhand_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::FileWrite("public/logs/x/topic.txt".to_string()));
/// assert!(format!("{}", err).contains("topic.txt"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
