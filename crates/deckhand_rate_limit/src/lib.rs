//! Rate-limit handling for image providers.
//!
//! Three pieces cooperate here:
//! - [`RateLimitHeaders`] reads a provider's reset hint and remaining quota
//!   out of a 429 response.
//! - [`BackoffPolicy`] turns that hint into a wait: the hint (or a default
//!   window) plus random jitter.
//! - [`AdmissionLimiter`] bounds how many image requests are in flight and,
//!   optionally, how many start per minute.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backoff;
mod detector;
mod limiter;

pub use backoff::BackoffPolicy;
pub use detector::{RateLimitHeaders, parse_reset_hint};
pub use limiter::{AdmissionGuard, AdmissionLimiter};
