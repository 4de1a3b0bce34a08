//! Persisted generations and their catalog projection.

use crate::{GeneratedImages, Presenter, SlideDeckOutline, TitleText};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::Serialize;
use std::path::PathBuf;

/// Everything a successful run hands to the artifact store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedGeneration {
    /// Raw topic text
    pub topic: String,
    /// Validated outline
    pub outline: SlideDeckOutline,
    /// One image per image slide
    pub images: GeneratedImages,
}

/// Where a generation was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct StoredLocation {
    /// Directory name, `<timestamp>-<kebab topic>`
    id: String,
    /// Absolute or root-relative directory path
    path: PathBuf,
    /// Image paths relative to the storage root, in slide order
    image_paths: Vec<String>,
}

impl StoredLocation {
    /// Describe a stored generation.
    pub fn new(id: impl Into<String>, path: impl Into<PathBuf>, image_paths: Vec<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            image_paths,
        }
    }
}

/// Read-only browsing view of one persisted generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct CatalogEntry {
    /// Directory name
    id: String,
    /// Creation time derived from the directory name
    date: DateTime<Utc>,
    /// Topic text
    topic: String,
    /// Deck title, if the manifest has one
    title: Option<TitleText>,
    /// Deck presenter, if the manifest has one
    presenter: Option<Presenter>,
    /// Image paths relative to the storage root, in slide order
    image_paths: Vec<String>,
}

impl CatalogEntry {
    /// Create a catalog entry.
    pub fn new(
        id: impl Into<String>,
        date: DateTime<Utc>,
        topic: impl Into<String>,
        title: Option<TitleText>,
        presenter: Option<Presenter>,
        image_paths: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            topic: topic.into(),
            title,
            presenter,
            image_paths,
        }
    }
}
