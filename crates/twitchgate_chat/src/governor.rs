//! Outbound message governor.

use derive_getters::Getters;
use tracing::{debug, instrument, warn};
use twitchgate_error::{ChatError, ChatErrorKind, ChatResult};
use twitchgate_rate_limit::{ChannelBucketRegistry, ChatQuota, ScopeKind};

use crate::{ChatTransport, Destination, reserved_command};

/// Gatekeeper for every plain chat line a bot sends.
///
/// Checks run in a fixed order and the first failure wins: destination,
/// length, reserved commands, then the channel quota. Rejected content
/// never touches the quota; a line refused for quota has already been
/// counted against it.
#[derive(Debug, Getters)]
pub struct MessageGovernor<T> {
    /// The underlying connection
    transport: T,
    /// Per-channel buckets
    registry: ChannelBucketRegistry,
}

impl<T: ChatTransport> MessageGovernor<T> {
    /// Governor with a fresh registry sized from `quota`.
    pub fn new(transport: T, quota: ChatQuota) -> Self {
        Self::with_registry(transport, ChannelBucketRegistry::new(quota))
    }

    /// Governor over an existing registry.
    pub fn with_registry(transport: T, registry: ChannelBucketRegistry) -> Self {
        Self {
            transport,
            registry,
        }
    }

    /// Send `content` to `destination`.
    ///
    /// # Errors
    ///
    /// - [`ChatErrorKind::InvalidDestination`] without a channel or recipient
    /// - [`ChatErrorKind::ContentTooLong`] beyond the configured length
    /// - [`ChatErrorKind::ReservedCommand`] for moderation and whisper commands
    /// - [`ChatErrorKind::RateLimited`] once the channel's window is spent
    /// - [`ChatErrorKind::Transport`] if the connection refuses the line
    #[instrument(skip(self, content), fields(channel = %destination.channel_name(), len = content.chars().count()))]
    pub async fn send(&self, destination: &Destination, content: &str) -> ChatResult<()> {
        destination.validate()?;

        let max = self.registry.quota().max_message_len;
        let length = content.chars().count();
        if length > max {
            return Err(ChatError::new(ChatErrorKind::ContentTooLong { length, max }));
        }

        if let Some(command) = reserved_command(content) {
            warn!(%command, "Refusing reserved chat command");
            return Err(ChatError::new(ChatErrorKind::ReservedCommand(
                command.to_string(),
            )));
        }

        let channel = destination.channel_name();
        let scope = ScopeKind::for_moderator(self.transport.is_moderator(channel).await);
        let bucket = self.registry.get_bucket(channel, scope).await;
        {
            let mut bucket = bucket.lock().await;
            bucket.update(None, None);
            if bucket.is_limited() {
                let retry_after_secs = bucket.retry_after().as_secs_f64();
                warn!(retry_after_secs, "Chat quota exhausted");
                return Err(ChatError::new(ChatErrorKind::RateLimited {
                    channel: channel.to_string(),
                    retry_after_secs,
                }));
            }
        }

        let content = content.replace(['\r', '\n'], " ");
        let line = destination.frame(&content);
        self.transport.send_line(&line).await?;
        debug!(%scope, "Chat line sent");
        Ok(())
    }
}
