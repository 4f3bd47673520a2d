//! Chat (IRC) send-path error types.

use derive_getters::Getters;

/// Reasons an outbound chat line was refused.
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum ChatErrorKind {
    /// Destination has no usable channel or user.
    #[display("Invalid destination: {}", _0)]
    InvalidDestination(String),

    /// Message body exceeds the protocol limit.
    #[display("Length of message can not be > {} (got {})", max, length)]
    ContentTooLong {
        /// Length of the rejected content in characters
        length: usize,
        /// Maximum accepted length
        max: usize,
    },

    /// Content invokes a chat command that has a dedicated method.
    #[display("Unauthorised chat command '{}' for send, use the built in method", _0)]
    ReservedCommand(String),

    /// The per-channel message quota is exhausted.
    #[display(
        "IRC message rate limit reached for channel <{}>. Please try again in {:.2}s",
        channel,
        retry_after_secs
    )]
    RateLimited {
        /// Normalized channel name
        channel: String,
        /// Seconds until the channel's window resets
        retry_after_secs: f64,
    },

    /// The underlying connection refused the line.
    #[display("Chat transport error: {}", _0)]
    Transport(String),
}

/// Chat error with source location tracking.
///
/// # Example
/// ```
/// use twitchgate_error::{ChatError, ChatErrorKind};
///
/// let err = ChatError::new(ChatErrorKind::ReservedCommand("ban".into()));
/// assert!(format!("{}", err).contains("ban"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Chat Error: {} at line {} in {}", kind, line, file)]
pub struct ChatError {
    kind: ChatErrorKind,
    line: u32,
    #[getter(skip)]
    file: &'static str,
}

impl ChatError {
    /// Source file where the error was created.
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// Create a new ChatError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ChatErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl From<ChatErrorKind> for ChatError {
    #[track_caller]
    fn from(kind: ChatErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Result type for chat operations.
pub type ChatResult<T> = Result<T, ChatError>;
