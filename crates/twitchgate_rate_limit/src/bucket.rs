//! Fixed-window token bucket.
//!
//! A [`Bucket`] counts consumed tokens inside a window that rolls over at
//! `reset_at`. Two accounting modes share the same state:
//!
//! - **Server-authoritative**: a Helix response reports how many requests
//!   remain (`Ratelimit-Remaining`) and when the window ends
//!   (`Ratelimit-Reset`); the bucket adopts both verbatim.
//! - **Optimistic**: with no feedback (chat lines, unmetered endpoints) every
//!   call consumes one token locally.
//!
//! Time is read from [`tokio::time::Instant`] so paused-clock tests drive the
//! window deterministically.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, instrument, warn};

use crate::QuotaConfig;

/// Which quota a bucket is sized for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    serde::Serialize,
    serde::Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    /// Helix REST quota for one client.
    Http,
    /// Chat quota for a channel where the bot is an ordinary user.
    Standard,
    /// Chat quota for a channel where the bot holds moderator status.
    Elevated,
}

impl ScopeKind {
    /// Chat scope for the given moderator status.
    pub fn for_moderator(is_moderator: bool) -> Self {
        if is_moderator {
            ScopeKind::Elevated
        } else {
            ScopeKind::Standard
        }
    }
}

/// Token-bucket quota for one scope and one fixed window.
///
/// `tokens` counts what has been consumed in the current window and never
/// exceeds `capacity`, so [`Bucket::is_limited`] is exactly
/// `tokens == capacity`.
#[derive(Debug, Clone)]
pub struct Bucket {
    scope: ScopeKind,
    capacity: u32,
    tokens: u32,
    window: Duration,
    reset_at: Instant,
}

impl Bucket {
    /// Create an empty bucket whose first window starts now.
    ///
    /// A zero capacity is raised to one.
    pub fn new(scope: ScopeKind, capacity: u32, window: Duration) -> Self {
        debug!(%scope, capacity, window_secs = window.as_secs(), "Creating bucket");
        Self {
            scope,
            capacity: capacity.max(1),
            tokens: 0,
            window,
            reset_at: Instant::now() + window,
        }
    }

    /// Create a bucket sized from configuration.
    pub fn for_scope(scope: ScopeKind, quota: &QuotaConfig) -> Self {
        Self::new(scope, quota.capacity, quota.window())
    }

    /// Scope this bucket is currently sized for.
    pub fn scope(&self) -> ScopeKind {
        self.scope
    }

    /// Maximum tokens per window.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Tokens consumed in the current window.
    pub fn tokens(&self) -> u32 {
        self.tokens
    }

    /// Tokens still available in the current window.
    pub fn remaining(&self) -> u32 {
        self.capacity - self.tokens
    }

    /// Length of a locally started window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Instant at which the current window rolls over.
    pub fn reset_at(&self) -> Instant {
        self.reset_at
    }

    /// Time left until the window rolls over (zero once it has).
    pub fn retry_after(&self) -> Duration {
        self.reset_at.saturating_duration_since(Instant::now())
    }

    /// Whether the current window's quota is used up.
    pub fn is_limited(&self) -> bool {
        self.tokens >= self.capacity
    }

    /// Clear consumed tokens and start a new window from now.
    pub fn reset(&mut self) {
        self.tokens = 0;
        self.reset_at = Instant::now() + self.window;
        debug!(scope = %self.scope, "Bucket window reset");
    }

    /// Reset the bucket if its window has elapsed. Returns whether it did.
    pub fn reset_if_expired(&mut self) -> bool {
        if Instant::now() >= self.reset_at {
            self.reset();
            true
        } else {
            false
        }
    }

    /// Record one governed operation.
    ///
    /// An expired window is reset first. A server-supplied `reset` replaces
    /// the window end verbatim. A server-supplied `remaining` sets
    /// `tokens = capacity - remaining`; without it the call consumes one
    /// token.
    pub fn update(&mut self, reset: Option<Instant>, remaining: Option<u32>) {
        self.apply(reset, remaining, true);
    }

    /// Apply server feedback without counting a call.
    ///
    /// Used for failed attempts: headers on a 5xx response still describe
    /// the quota, but the failure does not consume a token on its own.
    pub fn refresh(&mut self, reset: Option<Instant>, remaining: Option<u32>) {
        self.apply(reset, remaining, false);
    }

    fn apply(&mut self, reset: Option<Instant>, remaining: Option<u32>, count_call: bool) {
        self.reset_if_expired();

        if let Some(reset) = reset {
            self.reset_at = reset;
        }

        match remaining {
            Some(remaining) => self.tokens = self.capacity.saturating_sub(remaining),
            None if count_call => self.tokens = (self.tokens + 1).min(self.capacity),
            None => {}
        }

        debug!(
            scope = %self.scope,
            tokens = self.tokens,
            capacity = self.capacity,
            "Bucket updated"
        );
    }

    /// Adopt a server-reported window capacity (`Ratelimit-Limit`).
    pub fn adopt_capacity(&mut self, limit: u32) {
        if limit == 0 || limit == self.capacity {
            return;
        }
        debug!(old = self.capacity, new = limit, "Adopting server-reported capacity");
        self.capacity = limit;
        self.tokens = self.tokens.min(limit);
    }

    /// Change the scope and ceiling in place.
    ///
    /// Consumed tokens and the current window are kept; only the limit moves.
    /// Tokens are clamped when the ceiling shrinks below them.
    pub fn reclassify(&mut self, scope: ScopeKind, capacity: u32) {
        debug!(from = %self.scope, to = %scope, capacity, "Reclassifying bucket");
        self.scope = scope;
        self.capacity = capacity.max(1);
        self.tokens = self.tokens.min(self.capacity);
    }

    /// Suspend until the window rolls over, then reset.
    #[instrument(skip(self), fields(scope = %self.scope))]
    pub async fn wait_until_reset(&mut self) {
        warn!(wait = ?self.retry_after(), "Quota exhausted, waiting for window reset");
        sleep_until(self.reset_at).await;
        self.reset();
    }
}

/// Bucket behind an async mutex, shared by every caller of one scope.
///
/// Waiting for a window reset happens with the lock released, so an
/// abandoned wait leaves the bucket exactly as it was.
#[derive(Debug, Clone)]
pub struct SharedBucket(Arc<Mutex<Bucket>>);

impl SharedBucket {
    /// Wrap a bucket for shared use.
    pub fn new(bucket: Bucket) -> Self {
        Self(Arc::new(Mutex::new(bucket)))
    }

    /// Lock the bucket for inspection or mutation.
    pub async fn lock(&self) -> MutexGuard<'_, Bucket> {
        self.0.lock().await
    }

    /// Copy of the current bucket state.
    pub async fn snapshot(&self) -> Bucket {
        self.0.lock().await.clone()
    }

    /// Suspend while the bucket is limited. Returns whether any wait happened.
    #[instrument(skip(self))]
    pub async fn wait_if_limited(&self) -> bool {
        let mut waited = false;
        loop {
            let deadline = {
                let mut bucket = self.0.lock().await;
                bucket.reset_if_expired();
                if !bucket.is_limited() {
                    return waited;
                }
                warn!(
                    scope = %bucket.scope(),
                    wait = ?bucket.retry_after(),
                    "Quota exhausted, waiting for window reset"
                );
                bucket.reset_at()
            };
            sleep_until(deadline).await;
            waited = true;
        }
    }
}
