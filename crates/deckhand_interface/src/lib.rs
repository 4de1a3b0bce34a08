//! Trait definitions for Deckhand.
//!
//! The pipeline only ever sees these seams. Concrete providers live in
//! `deckhand_models`, the filesystem store in `deckhand_storage`, and tests
//! substitute their own fakes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{ArtifactStore, ImageDriver, TextDriver, TopicSource};
