//! Rate governance primitives.
//!
//! This crate provides the quota bookkeeping shared by the governed HTTP
//! session and the outbound chat governor:
//!
//! - [`Bucket`] - fixed-window token bucket that can defer to server-reported
//!   `Ratelimit-*` headers
//! - [`SharedBucket`] - serialized handle used by concurrent callers
//! - [`ChannelBucketRegistry`] - one bucket per chat channel, resized when the
//!   bot's moderator status changes
//! - [`RateLimitHeaders`] - parsed quota feedback from Helix responses
//! - [`TwitchgateConfig`] - TOML configuration for every numeric limit
//!
//! ```rust,ignore
//! use twitchgate_rate_limit::{ChannelBucketRegistry, ScopeKind, TwitchgateConfig};
//!
//! let config = TwitchgateConfig::load()?;
//! let registry = ChannelBucketRegistry::new(config.chat);
//! let bucket = registry.get_bucket("#forsen", ScopeKind::Elevated).await;
//! ```

mod bucket;
mod config;
mod detector;
mod registry;

pub use bucket::{Bucket, ScopeKind, SharedBucket};
pub use config::{ChatQuota, HttpConfig, QuotaConfig, RetryConfig, TwitchgateConfig};
pub use detector::RateLimitHeaders;
pub use registry::{ChannelBucketRegistry, normalize_channel};
