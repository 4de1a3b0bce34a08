//! Rate-limit backoff and hosted download behaviour of the image client.

mod fakes;

use deckhand_error::{ProviderErrorKind, RetryableError};
use deckhand_pipeline::ImageClient;
use deckhand_rate_limit::BackoffPolicy;
use fakes::FakeImageDriver;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

fn policy(max_retries: Option<u32>) -> BackoffPolicy {
    BackoffPolicy::new(Duration::from_secs(60), Duration::from_millis(1000), max_retries)
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_waits_for_reset_hint_then_succeeds() {
    let driver = Arc::new(FakeImageDriver::new().rate_limited(1, Some(Duration::from_secs(2))));
    let client = ImageClient::new(driver.clone(), policy(None));

    let start = Instant::now();
    let image = client.generate(4, "A llama filing taxes").await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(image.slide_index, 4);
    assert_eq!(image.data, b"A llama filing taxes");
    assert_eq!(driver.calls("A llama filing taxes"), 2);
    assert!(elapsed >= Duration::from_secs(2), "waited {:?}", elapsed);
    assert!(elapsed <= Duration::from_secs(3), "waited {:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_without_hint_uses_default_window() {
    let driver = Arc::new(FakeImageDriver::new().rate_limited(1, None));
    let client = ImageClient::new(driver.clone(), policy(None));

    let start = Instant::now();
    client.request_image("A haunted vending machine").await.unwrap();
    let elapsed = start.elapsed();

    assert!(elapsed >= Duration::from_secs(60), "waited {:?}", elapsed);
    assert!(elapsed <= Duration::from_secs(61), "waited {:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn test_repeated_rate_limits_are_absorbed() {
    let driver = Arc::new(FakeImageDriver::new().rate_limited(5, Some(Duration::from_secs(1))));
    let client = ImageClient::new(driver.clone(), policy(None));

    client.request_image("Penguin-free iceberg").await.unwrap();

    assert_eq!(driver.calls("Penguin-free iceberg"), 6);
}

#[tokio::test(start_paused = true)]
async fn test_retry_cap_surfaces_rate_limit() {
    let driver = Arc::new(FakeImageDriver::new().rate_limited(10, Some(Duration::from_secs(1))));
    let client = ImageClient::new(driver.clone(), policy(Some(2)));

    let err = client.request_image("A stubborn mule").await.unwrap_err();

    assert!(err.is_retryable());
    assert_eq!(driver.calls("A stubborn mule"), 3);
}

#[tokio::test(start_paused = true)]
async fn test_non_retryable_error_propagates_immediately() {
    let driver = Arc::new(FakeImageDriver::new().failing_on("Forbidden art"));
    let client = ImageClient::new(driver.clone(), policy(None));

    let start = Instant::now();
    let err = client.generate(0, "Forbidden art").await.unwrap_err();

    assert!(!err.is_retryable());
    assert!(matches!(
        err.as_provider().map(|p| &p.kind),
        Some(ProviderErrorKind::Api { status: 400, .. })
    ));
    assert_eq!(driver.calls("Forbidden art"), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_hosted_image_is_downloaded() {
    let driver = Arc::new(FakeImageDriver::new().hosted());
    let client = ImageClient::new(driver.clone(), policy(None));

    let image = client.generate(2, "A lighthouse made of cheese").await.unwrap();

    assert_eq!(image.mime_type, "image/jpeg");
    assert_eq!(image.extension(), "jpg");
    assert_eq!(image.data, b"A lighthouse made of cheese");
    assert_eq!(
        image.source_url.as_deref(),
        Some("https://images.test/A lighthouse made of cheese")
    );
    assert_eq!(driver.downloads(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_failed_download_is_retried() {
    let driver = Arc::new(FakeImageDriver::new().hosted().with_download_failures(2));
    let client = ImageClient::new(driver.clone(), policy(None));

    let image = client.generate(0, "A moose at a spelling bee").await.unwrap();

    assert_eq!(image.data, b"A moose at a spelling bee");
    assert_eq!(driver.downloads(), 3);
    assert_eq!(driver.calls("A moose at a spelling bee"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_download_gives_up_after_retries() {
    let driver = Arc::new(FakeImageDriver::new().hosted().with_download_failures(10));
    let client = ImageClient::new(driver.clone(), policy(None));

    let err = client.generate(0, "A moose at a spelling bee").await.unwrap_err();

    assert!(matches!(
        err.as_provider().map(|p| &p.kind),
        Some(ProviderErrorKind::Download(_))
    ));
    assert_eq!(driver.downloads(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_unsupported_download_is_not_retried() {
    let driver = Arc::new(FakeImageDriver::new().hosted().with_unsupported_download());
    let client = ImageClient::new(driver.clone(), policy(None));

    let err = client.generate(0, "A bus of librarians").await.unwrap_err();

    assert!(matches!(
        err.as_provider().map(|p| &p.kind),
        Some(ProviderErrorKind::UnsupportedOutput(_))
    ));
    assert_eq!(driver.downloads(), 1);
}
