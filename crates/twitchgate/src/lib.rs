//! twitchgate - rate-governed Twitch client.
//!
//! Every outbound call to the platform passes through a quota gate:
//!
//! - **Helix REST**: [`HttpSession`] shares one client-wide [`Bucket`] that
//!   adopts the server's `Ratelimit-*` headers, retries transient failures
//!   with exponential backoff and aggregates cursor-paginated results.
//! - **Chat**: [`MessageGovernor`] validates each line, refuses reserved
//!   commands and enforces per-channel quotas sized by moderator status.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use twitchgate::{HttpSession, ReqwestTransport, TwitchgateConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TwitchgateConfig::load()?;
//!     let transport = ReqwestTransport::new(&std::env::var("TWITCH_CLIENT_ID")?)?;
//!     let session = HttpSession::new(transport, config.http);
//!
//!     let games = session.get_top_games(Some(10)).await?;
//!     println!("{}", serde_json::to_string_pretty(&games)?);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod telemetry;

pub use telemetry::{init_console_telemetry, init_telemetry};

// Errors
pub use twitchgate_error::{
    ChatError, ChatErrorKind, ChatResult, ConfigError, ConfigErrorKind, HttpError, HttpErrorKind,
    HttpResult, TwitchgateError, TwitchgateErrorKind, TwitchgateResult,
};

// Quota bookkeeping and configuration
pub use twitchgate_rate_limit::{
    Bucket, ChannelBucketRegistry, ChatQuota, HttpConfig, QuotaConfig, RateLimitHeaders,
    RetryConfig, ScopeKind, SharedBucket, TwitchgateConfig, normalize_channel,
};

// Governed Helix session
pub use twitchgate_http::{
    Chatters, Collected, GovernedRequest, GovernedRequestBuilder, HttpRequest, HttpSession,
    HttpTransport, RawResponse, ReqwestTransport, ResponseBody, StreamQuery, StreamQueryBuilder,
    WebhookMode, WebhookSubscription, split_entries,
};

// Chat governor
pub use twitchgate_chat::{
    ChannelTransport, ChatTransport, Destination, MessageGovernor, ReservedCommand,
    reserved_command,
};
