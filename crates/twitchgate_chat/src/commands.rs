//! Chat commands that may not be sent as plain messages.
//!
//! Twitch chat interprets lines starting with `.` or `/` as commands.
//! Moderation and whisper commands have dedicated methods on the bot, so the
//! plain send path refuses them.

use std::str::FromStr;

/// Commands refused by [`crate::MessageGovernor::send`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[allow(missing_docs)]
pub enum ReservedCommand {
    Ban,
    Unban,
    Timeout,
    W,
    Colour,
    Color,
    Mod,
    Unmod,
    Clear,
    Subscribers,
    SubscribersOff,
    Slow,
    SlowOff,
    R9k,
    R9kOff,
    EmoteOnly,
    EmoteOnlyOff,
    Host,
    Unhost,
}

/// The reserved command `content` invokes, if any.
///
/// Only content starting with `.` or `/` is a command. Every leading `.` and
/// `/` is stripped and the first word is compared case-insensitively, so
/// `./BAN user` is caught while `.shoutout user` and `.banana` are not.
///
/// ```
/// use twitchgate_chat::{ReservedCommand, reserved_command};
///
/// assert_eq!(reserved_command("/timeout someone 10"), Some(ReservedCommand::Timeout));
/// assert_eq!(reserved_command(".me waves"), None);
/// assert_eq!(reserved_command("ban someone"), None);
/// ```
pub fn reserved_command(content: &str) -> Option<ReservedCommand> {
    if !content.starts_with(['.', '/']) {
        return None;
    }
    let command = content
        .trim_start_matches(['.', '/'])
        .split_whitespace()
        .next()?;
    ReservedCommand::from_str(command).ok()
}
