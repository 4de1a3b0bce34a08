//! The Deckhand generation pipeline.
//!
//! One run walks a fixed sequence of stages:
//!
//! ```text
//! Start → TopicAcquired → OutlineAcquired → ImagesAcquired → Persisted
//!                                                          ↘ Failed (any stage)
//! ```
//!
//! - [`OutlineClient`] sends a prompt to the text provider and returns the first text block.
//! - [`OutlineParser`] turns that text into a validated [`SlideDeckOutline`](deckhand_core::SlideDeckOutline).
//! - [`ImageClient`] requests one image, absorbing rate limits with backoff, and
//!   downloads hosted results before the run ends.
//! - [`PipelineOrchestrator`] drives the stages, fans image requests out under an
//!   admission limit, and hands the finished generation to an
//!   [`ArtifactStore`](deckhand_interface::ArtifactStore).
//!
//! Every collaborator is injected as a trait object, so tests substitute fakes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod image_client;
mod orchestrator;
mod outline_client;
mod outline_parser;
mod prompts;
mod topic;

pub use image_client::ImageClient;
pub use orchestrator::{GenerationReport, PipelineOrchestrator, PipelineState};
pub use outline_client::{OutlineClient, PromptConfiguration};
pub use outline_parser::OutlineParser;
pub use prompts::{OUTLINE_SCHEMA, outline_prompt, topic_prompt};
pub use topic::{LlmTopicSource, TopicPool};
