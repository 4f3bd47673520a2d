//! Tests for reserved command detection.

use strum::IntoEnumIterator;
use twitchgate_chat::{ReservedCommand, reserved_command};

#[test]
fn test_every_reserved_command_detected_with_either_prefix() {
    for command in ReservedCommand::iter() {
        let dot = format!(".{} someone", command);
        let slash = format!("/{}", command);
        assert_eq!(reserved_command(&dot), Some(command), "{}", dot);
        assert_eq!(reserved_command(&slash), Some(command), "{}", slash);
    }
}

#[test]
fn test_detection_is_case_insensitive_and_strips_all_prefixes() {
    assert_eq!(reserved_command(".BAN someone"), Some(ReservedCommand::Ban));
    assert_eq!(reserved_command("./.ban someone"), Some(ReservedCommand::Ban));
    assert_eq!(reserved_command("//EmoteOnlyOff"), Some(ReservedCommand::EmoteOnlyOff));
}

#[test]
fn test_other_content_is_not_reserved() {
    assert_eq!(reserved_command(".shoutout someone"), None);
    assert_eq!(reserved_command(".banana"), None);
    assert_eq!(reserved_command("ban someone"), None);
    assert_eq!(reserved_command("."), None);
    assert_eq!(reserved_command(""), None);
}

#[test]
fn test_command_names() {
    assert_eq!(ReservedCommand::SubscribersOff.to_string(), "subscribersoff");
    assert_eq!(ReservedCommand::R9kOff.as_ref(), "r9koff");
    assert_eq!(ReservedCommand::iter().count(), 19);
}
