//! Core data types for Deckhand.
//!
//! This crate holds the slide deck outline model, generated image containers,
//! the persisted-generation catalog projection, the provider request and
//! response shapes, and the layered configuration shared by every other crate.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod config;
mod image;
mod message;
mod outline;
mod output;
mod request;

pub use catalog::{CatalogEntry, CompletedGeneration, StoredLocation};
pub use config::{
    DeckhandConfig, ImageConfig, ImageProviderKind, ImageResponseFormat, PipelineConfig,
    ServerConfig, StorageConfig, TextConfig, TopicConfig, TopicSourceKind,
};
pub use image::{GeneratedImage, GeneratedImages, ImagePayload, ImageRequest};
pub use message::{Message, Role};
pub use outline::{ImageDescription, ImageSlide, Presenter, Slide, SlideDeckOutline, TitleSlide, TitleText};
pub use output::{Output, ToolCall};
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse};
