//! Per-channel chat buckets.
//!
//! Twitch limits chat lines per channel, with a larger allowance where the
//! bot is a moderator. Moderator status can change at any time, so the
//! registry resizes an existing bucket in place instead of replacing it and
//! losing the messages already counted in the current window.

use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use crate::{Bucket, ChatQuota, ScopeKind, SharedBucket};

/// Canonical registry key for a channel: lowercase, without a leading `#`.
pub fn normalize_channel(channel: &str) -> String {
    channel.trim().trim_start_matches('#').to_lowercase()
}

/// Mapping from channel to its chat bucket.
///
/// Entries are created lazily and live for the lifetime of the registry;
/// the set of channels a bot joins is bounded.
#[derive(Debug)]
pub struct ChannelBucketRegistry {
    quota: ChatQuota,
    buckets: Mutex<HashMap<String, SharedBucket>>,
}

impl ChannelBucketRegistry {
    /// Create an empty registry using the given chat limits.
    pub fn new(quota: ChatQuota) -> Self {
        debug!(?quota, "Creating channel bucket registry");
        Self {
            quota,
            buckets: Mutex::new(HashMap::new()),
        }
    }

    /// Chat limits buckets are sized from.
    pub fn quota(&self) -> &ChatQuota {
        &self.quota
    }

    /// Fetch the bucket for `channel`, creating or resizing it for `scope`.
    ///
    /// Insertion happens under the map lock and reclassification under the
    /// bucket's own lock. The map lock is released before the bucket is
    /// locked, so a busy channel never stalls lookups for other channels.
    #[instrument(skip(self))]
    pub async fn get_bucket(&self, channel: &str, scope: ScopeKind) -> SharedBucket {
        let key = normalize_channel(channel);
        let capacity = self.quota.capacity_for(scope);

        let shared = self
            .buckets
            .lock()
            .await
            .entry(key)
            .or_insert_with(|| SharedBucket::new(Bucket::new(scope, capacity, self.quota.window())))
            .clone();

        {
            let mut bucket = shared.lock().await;
            if bucket.scope() != scope {
                bucket.reclassify(scope, capacity);
            }
        }

        shared
    }

    /// Existing bucket for `channel`, if any message has been governed there.
    pub async fn get(&self, channel: &str) -> Option<SharedBucket> {
        self.buckets
            .lock()
            .await
            .get(&normalize_channel(channel))
            .cloned()
    }

    /// Number of channels tracked.
    pub async fn len(&self) -> usize {
        self.buckets.lock().await.len()
    }

    /// Whether no channel has been tracked yet.
    pub async fn is_empty(&self) -> bool {
        self.buckets.lock().await.is_empty()
    }
}

impl Default for ChannelBucketRegistry {
    fn default() -> Self {
        Self::new(ChatQuota::default())
    }
}
