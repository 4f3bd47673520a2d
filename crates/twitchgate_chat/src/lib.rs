//! Outbound chat governance.
//!
//! Every line a bot writes to chat passes through [`MessageGovernor::send`],
//! which rejects malformed or oversized content, refuses moderation commands
//! that have dedicated methods, and enforces the per-channel message quota
//! before the line reaches the connection.
//!
//! ```rust,ignore
//! use twitchgate_chat::{ChannelTransport, Destination, MessageGovernor};
//! use twitchgate_rate_limit::ChatQuota;
//!
//! let (transport, mut lines) = ChannelTransport::channel(64);
//! let governor = MessageGovernor::new(transport, ChatQuota::default());
//! governor.send(&Destination::channel("#forsen"), "hello").await?;
//! assert_eq!(lines.recv().await.unwrap(), "PRIVMSG #forsen :hello\r\n");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod commands;
mod destination;
mod governor;
mod transport;

pub use commands::{ReservedCommand, reserved_command};
pub use destination::Destination;
pub use governor::MessageGovernor;
pub use transport::{ChannelTransport, ChatTransport};
