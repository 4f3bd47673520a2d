//! Connection seam for outbound chat lines.

use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::{RwLock, mpsc};
use tracing::{debug, instrument};
use twitchgate_error::{ChatError, ChatErrorKind, ChatResult};
use twitchgate_rate_limit::normalize_channel;

/// What the governor needs from a chat connection.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Write one framed IRC line.
    async fn send_line(&self, line: &str) -> ChatResult<()>;

    /// Whether the bot holds moderator status in `channel` (normalized).
    async fn is_moderator(&self, channel: &str) -> bool;
}

/// [`ChatTransport`] that hands framed lines to a connection task over an
/// mpsc channel.
///
/// Moderator status is tracked from the connection's `USERSTATE` updates via
/// [`ChannelTransport::set_moderator`].
#[derive(Debug)]
pub struct ChannelTransport {
    sender: mpsc::Sender<String>,
    moderators: RwLock<HashSet<String>>,
}

impl ChannelTransport {
    /// Transport writing into `sender`.
    pub fn new(sender: mpsc::Sender<String>) -> Self {
        Self {
            sender,
            moderators: RwLock::new(HashSet::new()),
        }
    }

    /// Transport plus the receiving end a connection task drains.
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<String>) {
        let (sender, receiver) = mpsc::channel(buffer.max(1));
        (Self::new(sender), receiver)
    }

    /// Record the bot's moderator status in `channel`.
    #[instrument(skip(self))]
    pub async fn set_moderator(&self, channel: &str, is_moderator: bool) {
        let channel = normalize_channel(channel);
        let mut moderators = self.moderators.write().await;
        if is_moderator {
            moderators.insert(channel);
        } else {
            moderators.remove(&channel);
        }
        debug!(count = moderators.len(), "Moderator channels updated");
    }
}

#[async_trait]
impl ChatTransport for ChannelTransport {
    async fn send_line(&self, line: &str) -> ChatResult<()> {
        self.sender
            .send(line.to_string())
            .await
            .map_err(|e| ChatError::new(ChatErrorKind::Transport(e.to_string())))
    }

    async fn is_moderator(&self, channel: &str) -> bool {
        self.moderators.read().await.contains(channel)
    }
}
