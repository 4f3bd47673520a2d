//! Top-level error wrapper types.

use crate::{ChatError, ConfigError, HttpError};

/// Every failure a twitchgate operation can surface.
///
/// # Examples
///
/// ```
/// use twitchgate_error::{ConfigError, TwitchgateError};
///
/// let err: TwitchgateError = ConfigError::invalid("chat.window_secs", "must be at least 1").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum TwitchgateErrorKind {
    /// Governed HTTP request error
    #[from(HttpError)]
    Http(HttpError),
    /// Outbound chat error
    #[from(ChatError)]
    Chat(ChatError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// twitchgate error with kind discrimination.
///
/// # Examples
///
/// ```
/// use twitchgate_error::{ConfigError, ConfigErrorKind, TwitchgateResult};
///
/// fn might_fail() -> TwitchgateResult<()> {
///     Err(ConfigError::new(ConfigErrorKind::Missing("client id".into())))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Twitchgate Error: {}", _0)]
pub struct TwitchgateError(Box<TwitchgateErrorKind>);

impl TwitchgateError {
    /// Create a new error from a kind.
    pub fn new(kind: TwitchgateErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TwitchgateErrorKind {
        &self.0
    }
}

impl<T> From<T> for TwitchgateError
where
    T: Into<TwitchgateErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for twitchgate operations.
pub type TwitchgateResult<T> = std::result::Result<T, TwitchgateError>;
