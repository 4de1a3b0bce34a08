//! Admission control for concurrent image requests.
//!
//! A Tokio semaphore caps requests in flight. An optional governor quota
//! (GCRA) caps how many may start per minute.

use deckhand_core::ImageConfig;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, instrument};

type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Bounds in-flight image requests.
///
/// Cloning shares the same permits.
///
/// # Example
///
/// ```
/// use deckhand_rate_limit::AdmissionLimiter;
///
/// # #[tokio::main]
/// # async fn main() {
/// let limiter = AdmissionLimiter::new(2, None);
/// let first = limiter.acquire().await;
/// let second = limiter.acquire().await;
/// assert!(first.is_some() && second.is_some());
/// assert_eq!(limiter.available(), 0);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AdmissionLimiter {
    max_concurrent: usize,
    semaphore: Arc<Semaphore>,
    per_minute: Option<Arc<DirectRateLimiter>>,
}

impl AdmissionLimiter {
    /// Allow `max_concurrent` requests in flight (at least one), and at most
    /// `requests_per_minute` starts per minute when set.
    pub fn new(max_concurrent: usize, requests_per_minute: Option<u32>) -> Self {
        let max_concurrent = max_concurrent.max(1);
        let per_minute = requests_per_minute
            .and_then(NonZeroU32::new)
            .map(|n| Arc::new(GovernorRateLimiter::direct(Quota::per_minute(n))));

        Self {
            max_concurrent,
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
            per_minute,
        }
    }

    /// Build from the `[image]` configuration section.
    pub fn from_config(config: &ImageConfig) -> Self {
        Self::new(config.max_concurrent, config.requests_per_minute)
    }

    /// Wait for admission.
    ///
    /// The per-minute quota is awaited before taking a concurrency slot so a
    /// throttled request does not hold one. Returns `None` only if the
    /// limiter has been closed.
    #[instrument(skip(self), fields(available = self.semaphore.available_permits()))]
    pub async fn acquire(&self) -> Option<AdmissionGuard> {
        if let Some(limiter) = &self.per_minute {
            limiter.until_ready().await;
        }

        let permit = self.semaphore.clone().acquire_owned().await.ok()?;
        debug!("Admitted image request");
        Some(AdmissionGuard { _permit: permit })
    }

    /// Configured concurrency cap.
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Slots currently free.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Refuse further admissions; waiting callers get `None`.
    pub fn close(&self) {
        self.semaphore.close();
    }
}

/// Holds a concurrency slot until dropped.
#[derive(Debug)]
pub struct AdmissionGuard {
    _permit: OwnedSemaphorePermit,
}
