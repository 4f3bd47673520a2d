//! Tests for the fixed-window token bucket.

use std::time::Duration;
use tokio::time::{Instant, advance};
use twitchgate_rate_limit::{Bucket, QuotaConfig, ScopeKind, SharedBucket};

fn http_bucket() -> Bucket {
    Bucket::for_scope(ScopeKind::Http, &QuotaConfig::default())
}

#[test]
fn test_new_bucket_is_empty() {
    let bucket = http_bucket();
    assert_eq!(bucket.capacity(), 30);
    assert_eq!(bucket.tokens(), 0);
    assert_eq!(bucket.remaining(), 30);
    assert!(!bucket.is_limited());
}

#[test]
fn test_zero_capacity_is_raised_to_one() {
    let bucket = Bucket::new(ScopeKind::Standard, 0, Duration::from_secs(30));
    assert_eq!(bucket.capacity(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_server_remaining_is_authoritative_not_cumulative() {
    let mut bucket = http_bucket();

    for remaining in [29, 12, 30, 0, 7, 7] {
        bucket.update(None, Some(remaining));
        assert_eq!(bucket.tokens(), 30 - remaining);
        assert_eq!(bucket.is_limited(), remaining == 0);
    }
}

#[tokio::test(start_paused = true)]
async fn test_remaining_above_capacity_saturates() {
    let mut bucket = http_bucket();
    bucket.update(None, Some(800));
    assert_eq!(bucket.tokens(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_headerless_updates_count_one_each_until_reset() {
    let mut bucket = Bucket::new(ScopeKind::Standard, 20, Duration::from_secs(30));

    for expected in 1..=5 {
        bucket.update(None, None);
        assert_eq!(bucket.tokens(), expected);
    }

    advance(Duration::from_secs(30)).await;

    bucket.update(None, None);
    assert_eq!(bucket.tokens(), 1, "only the call after the reset counts");
    bucket.update(None, None);
    assert_eq!(bucket.tokens(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_limited_exactly_at_capacity() {
    let mut bucket = Bucket::new(ScopeKind::Standard, 3, Duration::from_secs(30));

    bucket.update(None, None);
    bucket.update(None, None);
    assert!(!bucket.is_limited());

    bucket.update(None, None);
    assert!(bucket.is_limited());
    assert_eq!(bucket.tokens(), bucket.capacity());

    // Further calls stay pinned at capacity.
    bucket.update(None, None);
    assert_eq!(bucket.tokens(), 3);
    assert!(bucket.is_limited());
}

#[tokio::test(start_paused = true)]
async fn test_server_reset_adopted_verbatim() {
    let mut bucket = http_bucket();
    let reset = Instant::now() + Duration::from_secs(5);

    bucket.update(Some(reset), Some(10));
    assert_eq!(bucket.reset_at(), reset);
    assert_eq!(bucket.retry_after(), Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn test_refresh_never_counts_a_call() {
    let mut bucket = http_bucket();

    bucket.refresh(None, None);
    assert_eq!(bucket.tokens(), 0);

    bucket.refresh(None, Some(25));
    assert_eq!(bucket.tokens(), 5);
}

#[tokio::test(start_paused = true)]
async fn test_wait_until_reset_sleeps_then_clears() {
    let mut bucket = Bucket::new(ScopeKind::Http, 1, Duration::from_secs(60));
    bucket.update(None, None);
    assert!(bucket.is_limited());

    let start = Instant::now();
    bucket.wait_until_reset().await;

    assert_eq!(start.elapsed(), Duration::from_secs(60));
    assert_eq!(bucket.tokens(), 0);
    assert!(!bucket.is_limited());
    assert!(bucket.reset_at() > Instant::now());
}

#[test]
fn test_reclassify_keeps_tokens_and_moves_ceiling() {
    let mut bucket = Bucket::new(ScopeKind::Standard, 20, Duration::from_secs(30));
    for _ in 0..20 {
        bucket.update(None, None);
    }
    assert!(bucket.is_limited());

    bucket.reclassify(ScopeKind::Elevated, 100);
    assert_eq!(bucket.tokens(), 20);
    assert_eq!(bucket.scope(), ScopeKind::Elevated);
    assert!(!bucket.is_limited());

    bucket.reclassify(ScopeKind::Standard, 10);
    assert_eq!(bucket.tokens(), 10);
    assert!(bucket.is_limited());
}

#[test]
fn test_adopt_capacity_from_server() {
    let mut bucket = http_bucket();
    bucket.adopt_capacity(800);
    assert_eq!(bucket.capacity(), 800);

    bucket.adopt_capacity(0);
    assert_eq!(bucket.capacity(), 800);
}

#[tokio::test(start_paused = true)]
async fn test_shared_bucket_does_not_wait_when_open() {
    let shared = SharedBucket::new(http_bucket());
    let start = Instant::now();

    assert!(!shared.wait_if_limited().await);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_shared_bucket_waits_for_window() {
    let shared = SharedBucket::new(Bucket::new(ScopeKind::Http, 2, Duration::from_secs(60)));
    {
        let mut bucket = shared.lock().await;
        bucket.update(None, Some(0));
    }

    let start = Instant::now();
    assert!(shared.wait_if_limited().await);

    assert_eq!(start.elapsed(), Duration::from_secs(60));
    let bucket = shared.snapshot().await;
    assert_eq!(bucket.tokens(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_wait_leaves_bucket_unchanged() {
    let shared = SharedBucket::new(Bucket::new(ScopeKind::Http, 2, Duration::from_secs(60)));
    shared.lock().await.update(None, Some(0));
    let before = shared.snapshot().await;

    let waited =
        tokio::time::timeout(Duration::from_secs(10), shared.wait_if_limited()).await;
    assert!(waited.is_err());

    let after = shared.snapshot().await;
    assert_eq!(after.tokens(), before.tokens());
    assert_eq!(after.reset_at(), before.reset_at());
}
