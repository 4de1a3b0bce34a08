//! Stability AI stable-image client.

mod client;

pub use client::StabilityImageClient;
