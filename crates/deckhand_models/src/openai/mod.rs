//! OpenAI image generations client.

mod client;
mod dto;

pub use client::OpenAiImageClient;
pub use dto::{OpenAiImageData, OpenAiImageRequest, OpenAiImageResponse};
