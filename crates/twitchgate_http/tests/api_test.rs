//! Tests for the Helix endpoint wrappers.

mod common;

use common::{PagedFixture, ScriptedTransport, ok_json, session};
use reqwest::Method;
use serde_json::json;
use twitchgate_error::HttpErrorKind;
use twitchgate_http::{StreamQuery, WebhookMode, WebhookSubscription, split_entries};

fn query_pairs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_split_entries_separates_ids_and_names() {
    let (names, ids) = split_entries(&["Forsen", "123", " 456 ", "", "123", "xqc"]).unwrap();
    assert_eq!(names, ["Forsen", "xqc"]);
    assert_eq!(ids, ["123", "456"]);
}

#[test]
fn test_split_entries_rejects_too_many() {
    let entries: Vec<String> = (0..101).map(|i| format!("user{}", i)).collect();
    let err = split_entries(&entries).unwrap_err();
    assert_eq!(err.kind(), &HttpErrorKind::TooManyEntries(101));

    let entries: Vec<String> = (0..100).map(|i| i.to_string()).collect();
    assert!(split_entries(&entries).is_ok());
}

#[tokio::test]
async fn test_get_users_sends_ids_then_logins() {
    let transport = ScriptedTransport::new([ok_json(json!({ "data": [{ "id": "1" }] }))]);
    let session = session(transport);

    let users = session.get_users(&["forsen", "22484632"]).await.unwrap();

    assert_eq!(users, vec![json!({ "id": "1" })]);
    let requests = session.transport().requests();
    assert_eq!(requests[0].url, "https://api.twitch.tv/helix/users");
    assert_eq!(
        requests[0].query,
        query_pairs(&[("id", "22484632"), ("login", "forsen"), ("first", "100")])
    );
}

#[tokio::test]
async fn test_get_followers_and_following_use_direction_params() {
    let transport = ScriptedTransport::new([
        ok_json(json!({ "data": [] })),
        ok_json(json!({ "data": [] })),
    ]);
    let session = session(transport);

    session.get_followers("42").await.unwrap();
    session.get_following("42").await.unwrap();

    let requests = session.transport().requests();
    assert_eq!(requests[0].query[0], ("to_id".to_string(), "42".to_string()));
    assert_eq!(requests[1].query[0], ("from_id".to_string(), "42".to_string()));
    assert!(requests.iter().all(|r| r.url.ends_with("/users/follows")));
}

#[tokio::test]
async fn test_get_streams_applies_filters_and_limit() {
    let session = session(PagedFixture::with_page_sizes(&[100, 100]));
    let query = StreamQuery::builder()
        .channels(vec!["forsen".to_string(), "71092938".to_string()])
        .language("en")
        .limit(120usize)
        .build()
        .unwrap();

    let streams = session.get_streams(&query).await.unwrap();

    assert_eq!(streams.len(), 120);
    let requests = session.transport().requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[0].query,
        query_pairs(&[
            ("user_id", "71092938"),
            ("user_login", "forsen"),
            ("language", "en"),
            ("first", "100"),
        ])
    );
    assert_eq!(requests[1].query[3], ("first".to_string(), "20".to_string()));
}

#[tokio::test]
async fn test_get_top_games_pages_to_limit() {
    let session = session(PagedFixture::with_page_sizes(&[100, 100, 100]));

    let games = session.get_top_games(Some(10)).await.unwrap();

    assert_eq!(games.len(), 10);
    assert_eq!(session.transport().attempts(), 1);
}

#[tokio::test]
async fn test_get_games_uses_name_param() {
    let transport = ScriptedTransport::new([ok_json(json!({ "data": [{ "name": "Chess" }] }))]);
    let session = session(transport);

    let games = session.get_games(&["Chess"]).await.unwrap();

    assert_eq!(games.len(), 1);
    assert_eq!(
        session.transport().requests()[0].query[0],
        ("name".to_string(), "Chess".to_string())
    );
}

#[tokio::test]
async fn test_webhook_subscription_posts_hub_body() {
    let transport = ScriptedTransport::new([common::status(202)]);
    let session = session(transport);
    let subscription = WebhookSubscription::new(
        "https://example.com/hook",
        WebhookMode::Subscribe,
        "https://api.twitch.tv/helix/users/follows?first=1&to_id=42",
        864000,
    )
    .with_secret("s3cret");

    session.modify_webhook_subscription(&subscription).await.unwrap();

    let request = &session.transport().requests()[0];
    assert_eq!(request.method, Method::POST);
    assert!(request.url.ends_with("/webhooks/hub"));
    assert_eq!(
        request.body,
        Some(json!({
            "hub.callback": "https://example.com/hook",
            "hub.mode": "subscribe",
            "hub.topic": "https://api.twitch.tv/helix/users/follows?first=1&to_id=42",
            "hub.lease_seconds": 864000,
            "hub.secret": "s3cret",
        }))
    );
}

#[tokio::test]
async fn test_get_chatters_bypasses_bucket() {
    let transport = ScriptedTransport::new([ok_json(json!({
        "chatter_count": 3,
        "chatters": {
            "moderators": ["nightbot"],
            "viewers": ["alice", "bob"],
        }
    }))]);
    let session = session(transport);

    let chatters = session.get_chatters("#Forsen").await.unwrap();

    assert_eq!(*chatters.count(), 3);
    assert_eq!(chatters.all(), &["nightbot", "alice", "bob"]);
    assert!(chatters.vips().is_empty());

    let request = &session.transport().requests()[0];
    assert_eq!(request.url, "https://tmi.twitch.tv/group/user/forsen/chatters");
    assert_eq!(session.bucket().snapshot().await.tokens(), 0);
}
