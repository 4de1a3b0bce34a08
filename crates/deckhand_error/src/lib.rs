//! Error types for the Deckhand workspace.
//!
//! Every error family follows the same two-part shape:
//! - a `*ErrorKind` enum naming the specific condition
//! - a `*Error` struct wrapping the kind together with the source location
//!   captured through `#[track_caller]`
//!
//! All families convert into [`DeckhandError`], so fallible code anywhere in
//! the workspace can return [`DeckhandResult`] and use `?`.
//!
//! # Examples
//!
//! ```
//! use deckhand_error::{DeckhandResult, ProviderError, ProviderErrorKind};
//!
//! fn call_provider() -> DeckhandResult<String> {
//!     Err(ProviderError::new(ProviderErrorKind::Http("connection refused".into())))?
//! }
//!
//! assert!(call_provider().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod json;
mod pipeline;
mod provider;
mod storage;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{DeckhandError, DeckhandErrorKind, DeckhandResult};
pub use json::JsonError;
pub use pipeline::{
    OutlineRequestFailure, ParseFailure, ParseFailureKind, PipelineError, PipelineErrorKind,
};
pub use provider::{ProviderError, ProviderErrorKind, RetryableError};
pub use storage::{StorageError, StorageErrorKind};
