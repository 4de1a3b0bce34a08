//! Deckhand - improv slide deck generator
//!
//! Deckhand asks a language model for a presentation topic and a structured
//! slide outline, renders every image slide with an image model, and stores
//! the finished deck on disk for browsing.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use deckhand::{DeckhandConfig, build_orchestrator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DeckhandConfig::load()?;
//!     let orchestrator = build_orchestrator(&config)?;
//!
//!     let report = orchestrator.run().await;
//!     match report.location {
//!         Some(location) => println!("Stored {}", location.id()),
//!         None => println!("Failed: {:?}", report.error),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `deckhand_error` - Error types
//! - `deckhand_core` - Outline model, image containers, configuration
//! - `deckhand_interface` - Driver, topic source and store traits
//! - `deckhand_rate_limit` - Rate-limit detection, backoff and admission
//! - `deckhand_models` - Anthropic, OpenAI and Stability providers
//! - `deckhand_storage` - Filesystem artifact store
//! - `deckhand_pipeline` - Topic, outline, image and persistence stages
//! - `deckhand_server` - HTTP API
//!
//! This crate re-exports everything for convenience.

pub use deckhand_core::*;
pub use deckhand_error::*;
pub use deckhand_interface::*;
pub use deckhand_models::*;
pub use deckhand_pipeline::*;
pub use deckhand_rate_limit::*;
pub use deckhand_server::*;
pub use deckhand_storage::*;

mod telemetry;
mod wiring;

pub use telemetry::{DEFAULT_LOG_FILTER, init_tracing};
pub use wiring::{build_orchestrator, topic_source_from_config};
