//! Quota feedback parsed from Helix response headers.
//!
//! Helix reports its bucket on every metered response:
//! - `Ratelimit-Limit`: tokens per window
//! - `Ratelimit-Remaining`: tokens left in the current window
//! - `Ratelimit-Reset`: Unix timestamp (seconds) at which the window refills
//!
//! Endpoints outside Helix send none of these; callers must opt out of
//! bucket accounting for them.

use reqwest::header::HeaderMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::time::Instant;
use tracing::{debug, instrument};

/// Header carrying the window capacity.
pub const LIMIT_HEADER: &str = "ratelimit-limit";
/// Header carrying the remaining token count.
pub const REMAINING_HEADER: &str = "ratelimit-remaining";
/// Header carrying the window reset timestamp.
pub const RESET_HEADER: &str = "ratelimit-reset";

/// Rate-limit values reported by one response. Absent or unparseable
/// headers are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RateLimitHeaders {
    /// Window capacity
    pub limit: Option<u32>,
    /// Tokens left in the window
    pub remaining: Option<u32>,
    /// Window end as Unix seconds
    pub reset: Option<u64>,
}

impl RateLimitHeaders {
    /// Parse the `Ratelimit-*` headers of a response.
    #[instrument(skip(headers))]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let detected = Self {
            limit: parse_header(headers, LIMIT_HEADER),
            remaining: parse_header(headers, REMAINING_HEADER),
            reset: parse_header(headers, RESET_HEADER),
        };
        if detected.is_present() {
            debug!(?detected, "Detected rate limit headers");
        }
        detected
    }

    /// Whether the response carried any quota feedback.
    pub fn is_present(&self) -> bool {
        self.limit.is_some() || self.remaining.is_some() || self.reset.is_some()
    }

    /// The reset timestamp on the tokio clock.
    ///
    /// The offset from the wall clock is applied to `Instant::now()`; a
    /// timestamp already in the past maps to now.
    pub fn reset_instant(&self) -> Option<Instant> {
        self.reset.map(|epoch| {
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default();
            let until = Duration::from_secs(epoch).saturating_sub(now);
            Instant::now() + until
        })
    }
}

fn parse_header<T: std::str::FromStr>(headers: &HeaderMap, key: &str) -> Option<T> {
    headers.get(key)?.to_str().ok()?.trim().parse().ok()
}
