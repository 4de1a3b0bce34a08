//! Admission limiter tests.

use deckhand_rate_limit::AdmissionLimiter;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[tokio::test]
async fn test_guard_releases_slot() {
    let limiter = AdmissionLimiter::new(1, None);

    let guard = limiter.acquire().await.expect("Admitted");
    assert_eq!(limiter.available(), 0);
    drop(guard);
    assert_eq!(limiter.available(), 1);
}

#[tokio::test]
async fn test_zero_concurrency_is_raised_to_one() {
    let limiter = AdmissionLimiter::new(0, None);
    assert_eq!(limiter.max_concurrent(), 1);
    assert!(limiter.acquire().await.is_some());
}

#[tokio::test]
async fn test_closed_limiter_refuses() {
    let limiter = AdmissionLimiter::new(2, None);
    limiter.close();
    assert!(limiter.acquire().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_in_flight_never_exceeds_cap() {
    let limiter = AdmissionLimiter::new(3, None);
    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::new();
    for _ in 0..10 {
        let limiter = limiter.clone();
        let in_flight = in_flight.clone();
        let peak = peak.clone();
        handles.push(tokio::spawn(async move {
            let _guard = limiter.acquire().await.expect("Admitted");
            let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(100)).await;
            in_flight.fetch_sub(1, Ordering::SeqCst);
        }));
    }

    for handle in handles {
        handle.await.expect("Task completes");
    }

    assert_eq!(peak.load(Ordering::SeqCst), 3);
    assert_eq!(limiter.available(), 3);
}
