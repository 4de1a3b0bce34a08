//! Backoff policy tests.

use deckhand_core::ImageConfig;
use deckhand_rate_limit::BackoffPolicy;
use std::time::Duration;

#[test]
fn test_hint_plus_bounded_jitter() {
    let policy = BackoffPolicy::new(Duration::from_secs(60), Duration::from_millis(1000), None);

    for _ in 0..50 {
        let wait = policy.delay(Some(Duration::from_secs(2)));
        assert!(wait >= Duration::from_secs(2));
        assert!(wait <= Duration::from_secs(3));
    }
}

#[test]
fn test_missing_hint_uses_default_window() {
    let policy = BackoffPolicy::new(Duration::from_secs(60), Duration::from_millis(1000), None);

    for _ in 0..50 {
        let wait = policy.delay(None);
        assert!(wait >= Duration::from_secs(60));
        assert!(wait <= Duration::from_secs(61));
    }
}

#[test]
fn test_explicit_jitter_is_clamped() {
    let policy = BackoffPolicy::new(Duration::from_secs(1), Duration::from_millis(100), None);

    let wait = policy.delay_with_jitter(None, Duration::from_secs(5));
    assert_eq!(wait, Duration::from_millis(1100));
}

#[test]
fn test_zero_jitter() {
    let policy = BackoffPolicy::new(Duration::from_secs(1), Duration::ZERO, None);
    assert_eq!(policy.delay(Some(Duration::from_millis(400))), Duration::from_millis(400));
}

#[test]
fn test_retry_cap() {
    let unbounded = BackoffPolicy::new(Duration::from_secs(1), Duration::ZERO, None);
    assert!(unbounded.may_retry(10_000));

    let capped = BackoffPolicy::new(Duration::from_secs(1), Duration::ZERO, Some(2));
    assert!(capped.may_retry(0));
    assert!(capped.may_retry(1));
    assert!(!capped.may_retry(2));
}

#[test]
fn test_from_config() {
    let config = ImageConfig {
        default_reset_secs: 15,
        max_jitter_ms: 250,
        max_rate_limit_retries: Some(4),
        ..ImageConfig::default()
    };

    let policy = BackoffPolicy::from_config(&config);
    assert_eq!(policy.default_reset(), Duration::from_secs(15));
    assert_eq!(policy.max_jitter(), Duration::from_millis(250));
    assert_eq!(policy.max_retries(), Some(4));
}
