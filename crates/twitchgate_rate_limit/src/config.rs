//! Configuration structures for quotas and retry behavior.
//!
//! Every numeric limit used by the governors is configuration rather than a
//! hard-coded constant, because Twitch adjusts its published limits. The
//! configuration system supports:
//! - Bundled defaults (include_str! from twitchgate.toml)
//! - User overrides (./twitchgate.toml or ~/.config/twitchgate/twitchgate.toml)
//! - Automatic merging with user values taking precedence

use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use twitchgate_error::{ConfigError, ConfigErrorKind};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../twitchgate.toml");

/// Capacity and window of one token bucket.
///
/// ```toml
/// [http.quota]
/// capacity = 30
/// window_secs = 60
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuotaConfig {
    /// Tokens available per window
    pub capacity: u32,
    /// Window length in seconds
    pub window_secs: u64,
}

impl QuotaConfig {
    /// Window length as a duration.
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            capacity: 30,
            window_secs: 60,
        }
    }
}

/// Attempt budget and backoff bases for the retry engine.
///
/// After a failed attempt `n` (zero-based) the engine sleeps `base^n + 1`
/// seconds, using `server_error_base` for 5xx responses and
/// `rate_limit_base` for 429 responses on endpoints without a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RetryConfig {
    /// Total attempts per logical request
    pub max_attempts: u32,
    /// Backoff base for 500-504 responses
    pub server_error_base: u64,
    /// Backoff base for 429 responses when no bucket drives the wait
    pub rate_limit_base: u64,
}

impl RetryConfig {
    /// Sleep after a server error on zero-based attempt `attempt`.
    pub fn server_error_backoff(&self, attempt: u32) -> Duration {
        backoff(self.server_error_base, attempt)
    }

    /// Sleep after an unbucketed 429 on zero-based attempt `attempt`.
    pub fn rate_limit_backoff(&self, attempt: u32) -> Duration {
        backoff(self.rate_limit_base, attempt)
    }
}

fn backoff(base: u64, attempt: u32) -> Duration {
    Duration::from_secs(base.saturating_pow(attempt).saturating_add(1))
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            server_error_base: 2,
            rate_limit_base: 3,
        }
    }
}

/// Helix REST settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HttpConfig {
    /// Base URL prefixed to relative request paths
    pub base_url: String,
    /// Maximum records requested per page
    pub page_size: usize,
    /// Client-wide quota used until the server reports its own
    #[serde(default)]
    pub quota: QuotaConfig,
    /// Retry policy
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.twitch.tv/helix".to_string(),
            page_size: 100,
            quota: QuotaConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

/// Chat send limits, per channel.
///
/// ```toml
/// [chat]
/// max_message_len = 500
/// window_secs = 30
/// standard_capacity = 20
/// elevated_capacity = 100
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatQuota {
    /// Longest accepted message in characters
    pub max_message_len: usize,
    /// Window length in seconds
    pub window_secs: u64,
    /// Messages per window without moderator status
    pub standard_capacity: u32,
    /// Messages per window with moderator status
    pub elevated_capacity: u32,
}

impl ChatQuota {
    /// Window length as a duration.
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    /// Capacity for a chat scope. `Http` is sized like `Standard`.
    pub fn capacity_for(&self, scope: crate::ScopeKind) -> u32 {
        match scope {
            crate::ScopeKind::Elevated => self.elevated_capacity,
            crate::ScopeKind::Standard | crate::ScopeKind::Http => self.standard_capacity,
        }
    }
}

impl Default for ChatQuota {
    fn default() -> Self {
        Self {
            max_message_len: 500,
            window_secs: 30,
            standard_capacity: 20,
            elevated_capacity: 100,
        }
    }
}

/// Top-level twitchgate configuration.
///
/// Loads limits from TOML files with a precedence system:
/// 1. Bundled defaults (include_str! from twitchgate.toml)
/// 2. User override (./twitchgate.toml or ~/.config/twitchgate/twitchgate.toml)
///
/// # Example
///
/// ```no_run
/// use twitchgate_rate_limit::TwitchgateConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = TwitchgateConfig::load()?;
/// println!("Helix quota: {} per {}s", config.http.quota.capacity, config.http.quota.window_secs);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct TwitchgateConfig {
    /// Helix REST settings
    #[serde(default)]
    pub http: HttpConfig,
    /// Chat send limits
    #[serde(default)]
    pub chat: ChatQuota,
}

impl TwitchgateConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a value is
    /// out of range (see [`TwitchgateConfig::validate`]).
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        debug!("Loading configuration from file");

        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()));
        Self::finish(builder)
    }

    /// Load configuration with precedence: user override > bundled default.
    ///
    /// Configuration sources in order of precedence (later sources override earlier):
    /// 1. Bundled defaults (twitchgate.toml shipped with the library)
    /// 2. User config in home directory (~/.config/twitchgate/twitchgate.toml)
    /// 3. User config in current directory (./twitchgate.toml)
    ///
    /// User config files are optional and will be silently skipped if not found.
    #[instrument]
    pub fn load() -> Result<Self, ConfigError> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/twitchgate/twitchgate.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("twitchgate").required(false));

        Self::finish(builder)
    }

    /// Parse configuration from a TOML string layered over the bundled defaults.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(toml, FileFormat::Toml));
        Self::finish(builder)
    }

    /// Reject values the governors cannot work with.
    ///
    /// A zero window would reset on every update and never limit, and a
    /// zero attempt budget would never send.
    ///
    /// # Errors
    ///
    /// [`ConfigErrorKind::Invalid`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let http = &self.http;
        let chat = &self.chat;

        let checks = [
            (http.base_url.trim().is_empty(), "http.base_url", "must not be empty"),
            (
                !(1..=100).contains(&http.page_size),
                "http.page_size",
                "must be between 1 and 100",
            ),
            (http.quota.capacity == 0, "http.quota.capacity", "must be at least 1"),
            (http.quota.window_secs == 0, "http.quota.window_secs", "must be at least 1"),
            (http.retry.max_attempts == 0, "http.retry.max_attempts", "must be at least 1"),
            (chat.max_message_len == 0, "chat.max_message_len", "must be at least 1"),
            (chat.window_secs == 0, "chat.window_secs", "must be at least 1"),
            (chat.standard_capacity == 0, "chat.standard_capacity", "must be at least 1"),
            (chat.elevated_capacity == 0, "chat.elevated_capacity", "must be at least 1"),
        ];

        match checks.into_iter().find(|(failed, _, _)| *failed) {
            Some((_, field, reason)) => {
                warn!(field, reason, "Rejecting configuration");
                Err(ConfigError::invalid(field, reason))
            }
            None => Ok(()),
        }
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Read(e.to_string())))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Parse(e.to_string())))?;
        config.validate()?;
        Ok(config)
    }
}
