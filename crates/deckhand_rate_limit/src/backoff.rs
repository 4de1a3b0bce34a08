//! Rate-limit wait computation.

use deckhand_core::ImageConfig;
use rand::Rng;
use std::time::Duration;

/// How long to wait after a rate-limit rejection, and how often to try again.
///
/// The wait is the provider's reset hint, or `default_reset` when there is
/// none, plus a uniformly random jitter in `0..=max_jitter` so concurrent
/// requests that were rejected together do not retry together.
///
/// # Example
///
/// ```
/// use deckhand_rate_limit::BackoffPolicy;
/// use std::time::Duration;
///
/// let policy = BackoffPolicy::new(Duration::from_secs(60), Duration::from_millis(1000), None);
///
/// let wait = policy.delay_with_jitter(Some(Duration::from_secs(2)), Duration::from_millis(300));
/// assert_eq!(wait, Duration::from_millis(2300));
///
/// let wait = policy.delay_with_jitter(None, Duration::ZERO);
/// assert_eq!(wait, Duration::from_secs(60));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    default_reset: Duration,
    max_jitter: Duration,
    max_retries: Option<u32>,
}

impl BackoffPolicy {
    /// Create a policy. `max_retries` of `None` retries without bound.
    pub fn new(default_reset: Duration, max_jitter: Duration, max_retries: Option<u32>) -> Self {
        Self {
            default_reset,
            max_jitter,
            max_retries,
        }
    }

    /// Build from the `[image]` configuration section.
    pub fn from_config(config: &ImageConfig) -> Self {
        Self::new(
            Duration::from_secs(config.default_reset_secs),
            Duration::from_millis(config.max_jitter_ms),
            config.max_rate_limit_retries,
        )
    }

    /// Wait for a rejection with the given hint, drawing fresh jitter.
    pub fn delay(&self, hint: Option<Duration>) -> Duration {
        let max_jitter_ms = u64::try_from(self.max_jitter.as_millis()).unwrap_or(u64::MAX);
        let jitter = if max_jitter_ms == 0 {
            Duration::ZERO
        } else {
            Duration::from_millis(rand::thread_rng().gen_range(0..=max_jitter_ms))
        };
        self.delay_with_jitter(hint, jitter)
    }

    /// Wait for a rejection with the given hint and an explicit jitter.
    pub fn delay_with_jitter(&self, hint: Option<Duration>, jitter: Duration) -> Duration {
        hint.unwrap_or(self.default_reset)
            .saturating_add(jitter.min(self.max_jitter))
    }

    /// Whether another attempt is allowed after `retries_so_far` rate-limit retries.
    pub fn may_retry(&self, retries_so_far: u32) -> bool {
        self.max_retries.is_none_or(|max| retries_so_far < max)
    }

    /// Wait used when a rejection has no hint.
    pub fn default_reset(&self) -> Duration {
        self.default_reset
    }

    /// Upper bound on jitter.
    pub fn max_jitter(&self) -> Duration {
        self.max_jitter
    }

    /// Retry cap, if any.
    pub fn max_retries(&self) -> Option<u32> {
        self.max_retries
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::from_config(&ImageConfig::default())
    }
}
