//! Where a chat line goes.

use twitchgate_error::{ChatError, ChatErrorKind, ChatResult};
use twitchgate_rate_limit::normalize_channel;

/// Target of an outbound line.
///
/// Channel names are stored normalized (lowercase, no leading `#`). A whisper
/// still travels through a channel connection, so it carries both.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Destination {
    /// Public message in a channel.
    Channel {
        /// Normalized channel name
        channel: String,
    },
    /// Whisper to a user, sent over `channel`.
    User {
        /// Normalized channel name
        channel: String,
        /// Recipient login
        user: String,
    },
}

impl Destination {
    /// Public message in `channel`.
    pub fn channel(channel: &str) -> Self {
        Destination::Channel {
            channel: normalize_channel(channel),
        }
    }

    /// Whisper to `user` over `channel`.
    pub fn user(channel: &str, user: &str) -> Self {
        Destination::User {
            channel: normalize_channel(channel),
            user: user.trim().to_string(),
        }
    }

    /// The channel whose quota governs this destination.
    pub fn channel_name(&self) -> &str {
        match self {
            Destination::Channel { channel } | Destination::User { channel, .. } => channel,
        }
    }

    /// Reject destinations with no channel, or a whisper with no recipient.
    pub fn validate(&self) -> ChatResult<()> {
        match self {
            Destination::Channel { channel } | Destination::User { channel, .. }
                if channel.is_empty() =>
            {
                Err(ChatError::new(ChatErrorKind::InvalidDestination(
                    "Invalid channel for destination. Must be channel or user.".to_string(),
                )))
            }
            Destination::User { user, .. } if user.is_empty() => Err(ChatError::new(
                ChatErrorKind::InvalidDestination("Whisper requires a recipient.".to_string()),
            )),
            _ => Ok(()),
        }
    }

    /// IRC line carrying `content` to this destination, CRLF terminated.
    ///
    /// `content` must already be free of line breaks.
    pub fn frame(&self, content: &str) -> String {
        match self {
            Destination::Channel { channel } => format!("PRIVMSG #{} :{}\r\n", channel, content),
            Destination::User { channel, user } => {
                format!("PRIVMSG #{} :.w {} {}\r\n", channel, user, content)
            }
        }
    }
}
