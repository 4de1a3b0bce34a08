//! HTTP surface for Deckhand.
//!
//! | Route | Purpose |
//! |---|---|
//! | `GET /health` | Liveness probe |
//! | `POST /generate` | Run the pipeline once and report the outcome |
//! | `GET /presentations` | Catalog of stored generations, newest first |
//! | `GET /logs/*` | Static files from the storage root |
//!
//! Catalog image paths are relative to the storage root, so a client turns
//! `path` into `/logs/{path}` to fetch the image.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod body;

pub use api::{AppState, create_router, serve, status_for};
pub use body::{ErrorBody, GenerationBody, ImageSummary};
