//! Tests for the configuration system.

use std::io::Write;
use std::time::Duration;
use twitchgate_error::ConfigErrorKind;
use twitchgate_rate_limit::{RetryConfig, TwitchgateConfig};

#[test]
fn test_load_bundled_defaults() {
    let config = TwitchgateConfig::load().unwrap();

    assert_eq!(config.http.base_url, "https://api.twitch.tv/helix");
    assert_eq!(config.http.page_size, 100);
    assert_eq!(config.http.quota.capacity, 30);
    assert_eq!(config.http.quota.window_secs, 60);
    assert_eq!(config.http.retry.max_attempts, 5);
    assert_eq!(config.chat.standard_capacity, 20);
    assert_eq!(config.chat.elevated_capacity, 100);
    assert_eq!(config.chat.window_secs, 30);
    assert_eq!(config.chat.max_message_len, 500);
}

#[test]
fn test_default_matches_bundled_file() {
    let bundled = TwitchgateConfig::from_toml("").unwrap();
    assert_eq!(bundled, TwitchgateConfig::default());
}

#[test]
fn test_partial_override() {
    let config = TwitchgateConfig::from_toml(
        r#"
        [http.quota]
        capacity = 800

        [chat]
        elevated_capacity = 50
        "#,
    )
    .unwrap();

    assert_eq!(config.http.quota.capacity, 800);
    assert_eq!(config.http.quota.window_secs, 60);
    assert_eq!(config.chat.elevated_capacity, 50);
    assert_eq!(config.chat.standard_capacity, 20);
}

#[test]
fn test_from_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[http.retry]\nmax_attempts = 3").unwrap();

    let config = TwitchgateConfig::from_file(file.path()).unwrap();
    assert_eq!(config.http.retry.max_attempts, 3);
    assert_eq!(config.http.retry.server_error_base, 2);
}

#[test]
fn test_invalid_value_is_config_error() {
    let err = TwitchgateConfig::from_toml("[chat]\nwindow_secs = \"soon\"").unwrap_err();
    assert!(matches!(err.kind(), ConfigErrorKind::Parse(_)));
    assert!(err.to_string().contains("Failed to parse configuration"));
}

#[test]
fn test_zero_window_rejected() {
    let err = TwitchgateConfig::from_toml("[chat]\nwindow_secs = 0").unwrap_err();
    match err.kind() {
        ConfigErrorKind::Invalid { field, .. } => assert_eq!(field, "chat.window_secs"),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_zero_attempt_budget_rejected() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[http.retry]\nmax_attempts = 0").unwrap();

    let err = TwitchgateConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(
        err.kind(),
        ConfigErrorKind::Invalid { field, .. } if field == "http.retry.max_attempts"
    ));
}

#[test]
fn test_validate_checks_every_limit() {
    assert!(TwitchgateConfig::default().validate().is_ok());

    let mut config = TwitchgateConfig::default();
    config.http.page_size = 101;
    assert!(config.validate().is_err());

    let mut config = TwitchgateConfig::default();
    config.chat.elevated_capacity = 0;
    assert!(config.validate().is_err());

    let mut config = TwitchgateConfig::default();
    config.http.quota.window_secs = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_backoff_schedule() {
    let retry = RetryConfig::default();

    let server: Vec<_> = (0..5).map(|n| retry.server_error_backoff(n)).collect();
    assert_eq!(
        server,
        [2, 3, 5, 9, 17].map(Duration::from_secs).to_vec()
    );

    let limited: Vec<_> = (0..3).map(|n| retry.rate_limit_backoff(n)).collect();
    assert_eq!(limited, [2, 4, 10].map(Duration::from_secs).to_vec());
}
