//! Helix endpoint wrappers.
//!
//! These only assemble paths and parameters; quota, retries and paging are
//! handled by the session. Records are returned as raw JSON values.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, instrument};
use twitchgate_error::{HttpError, HttpErrorKind, HttpResult};
use twitchgate_rate_limit::normalize_channel;

use crate::{GovernedRequest, HttpSession, HttpTransport, ResponseBody};

/// Most ids and names a single lookup accepts.
pub const MAX_LOOKUP_ENTRIES: usize = 100;

/// Legacy chat-presence service (no quota headers).
const TMI_URL: &str = "https://tmi.twitch.tv";

/// Split lookup entries into `(names, ids)`.
///
/// Entries made only of digits are ids; everything else is a login or name.
/// Duplicates are dropped, first occurrence wins.
///
/// # Errors
///
/// [`HttpErrorKind::TooManyEntries`] when more than 100 distinct entries remain.
///
/// ```
/// use twitchgate_http::split_entries;
///
/// let (names, ids) = split_entries(&["forsen", "22484632", "forsen"]).unwrap();
/// assert_eq!(names, ["forsen"]);
/// assert_eq!(ids, ["22484632"]);
/// ```
pub fn split_entries<S: AsRef<str>>(entries: &[S]) -> HttpResult<(Vec<String>, Vec<String>)> {
    let mut names: Vec<String> = Vec::new();
    let mut ids: Vec<String> = Vec::new();

    for entry in entries {
        let entry = entry.as_ref().trim();
        if entry.is_empty() {
            continue;
        }
        let target = if entry.bytes().all(|b| b.is_ascii_digit()) {
            &mut ids
        } else {
            &mut names
        };
        if !target.iter().any(|existing| existing == entry) {
            target.push(entry.to_string());
        }
    }

    let total = names.len() + ids.len();
    if total > MAX_LOOKUP_ENTRIES {
        return Err(HttpError::new(HttpErrorKind::TooManyEntries(total)));
    }
    Ok((names, ids))
}

/// Filters for `GET /streams`.
#[derive(Debug, Clone, Default, PartialEq, derive_builder::Builder, derive_getters::Getters)]
#[builder(setter(into), default)]
pub struct StreamQuery {
    /// Channel logins or ids; empty means all live streams
    channels: Vec<String>,
    /// Restrict to one game
    #[builder(setter(into, strip_option))]
    game_id: Option<String>,
    /// Restrict to one broadcast language
    #[builder(setter(into, strip_option))]
    language: Option<String>,
    /// Maximum streams to return; `None` pages through everything
    #[builder(setter(into, strip_option))]
    limit: Option<usize>,
}

impl StreamQuery {
    /// Start building a query.
    pub fn builder() -> StreamQueryBuilder {
        StreamQueryBuilder::default()
    }
}

/// Webhook hub action.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum WebhookMode {
    /// Start receiving notifications
    Subscribe,
    /// Stop receiving notifications
    Unsubscribe,
}

/// Parameters for `POST /webhooks/hub`.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct WebhookSubscription {
    callback: String,
    mode: WebhookMode,
    topic: String,
    lease_seconds: u64,
    secret: Option<String>,
}

impl WebhookSubscription {
    /// Subscription request without a signing secret.
    pub fn new(
        callback: impl Into<String>,
        mode: WebhookMode,
        topic: impl Into<String>,
        lease_seconds: u64,
    ) -> Self {
        Self {
            callback: callback.into(),
            mode,
            topic: topic.into(),
            lease_seconds,
            secret: None,
        }
    }

    /// Sign notifications with `secret`.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    fn to_body(&self) -> Value {
        let mut body = json!({
            "hub.callback": self.callback,
            "hub.mode": self.mode.to_string(),
            "hub.topic": self.topic,
            "hub.lease_seconds": self.lease_seconds,
        });
        if let (Some(secret), Some(map)) = (&self.secret, body.as_object_mut()) {
            map.insert("hub.secret".to_string(), Value::String(secret.clone()));
        }
        body
    }
}

/// Users present in a channel's chat, grouped by role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, derive_getters::Getters)]
pub struct Chatters {
    count: u64,
    all: Vec<String>,
    vips: Vec<String>,
    moderators: Vec<String>,
    staff: Vec<String>,
    admins: Vec<String>,
    global_mods: Vec<String>,
    viewers: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ChattersResponse {
    #[serde(default)]
    chatter_count: u64,
    #[serde(default)]
    chatters: ChatterGroups,
}

#[derive(Debug, Default, Deserialize)]
struct ChatterGroups {
    #[serde(default)]
    vips: Vec<String>,
    #[serde(default)]
    moderators: Vec<String>,
    #[serde(default)]
    staff: Vec<String>,
    #[serde(default)]
    admins: Vec<String>,
    #[serde(default)]
    global_mods: Vec<String>,
    #[serde(default)]
    viewers: Vec<String>,
}

impl From<ChattersResponse> for Chatters {
    fn from(response: ChattersResponse) -> Self {
        let groups = response.chatters;
        let all = [
            &groups.vips,
            &groups.moderators,
            &groups.staff,
            &groups.admins,
            &groups.global_mods,
            &groups.viewers,
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect();

        Self {
            count: response.chatter_count,
            all,
            vips: groups.vips,
            moderators: groups.moderators,
            staff: groups.staff,
            admins: groups.admins,
            global_mods: groups.global_mods,
            viewers: groups.viewers,
        }
    }
}

impl<T: HttpTransport> HttpSession<T> {
    /// `GET /users` by login or id.
    #[instrument(skip(self, users))]
    pub async fn get_users<S: AsRef<str>>(&self, users: &[S]) -> HttpResult<Vec<Value>> {
        let (names, ids) = split_entries(users)?;
        let request = GovernedRequest::get("/users")
            .params(ids.into_iter().map(|id| ("id", id)))
            .params(names.into_iter().map(|name| ("login", name)));

        self.request(&request, None).await?.into_records()
    }

    /// Follows pointing at `user_id`.
    #[instrument(skip(self))]
    pub async fn get_followers(&self, user_id: &str) -> HttpResult<Vec<Value>> {
        let request = GovernedRequest::get("/users/follows").param("to_id", user_id);
        self.request(&request, None).await?.into_records()
    }

    /// Follows made by `user_id`.
    #[instrument(skip(self))]
    pub async fn get_following(&self, user_id: &str) -> HttpResult<Vec<Value>> {
        let request = GovernedRequest::get("/users/follows").param("from_id", user_id);
        self.request(&request, None).await?.into_records()
    }

    /// `GET /streams` with optional channel, game and language filters.
    #[instrument(skip(self))]
    pub async fn get_streams(&self, query: &StreamQuery) -> HttpResult<Vec<Value>> {
        let mut request = GovernedRequest::get("/streams");
        if !query.channels().is_empty() {
            let (names, ids) = split_entries(query.channels().as_slice())?;
            request = request
                .params(ids.into_iter().map(|id| ("user_id", id)))
                .params(names.into_iter().map(|name| ("user_login", name)));
        }
        if let Some(game_id) = query.game_id() {
            request = request.param("game_id", game_id.as_str());
        }
        if let Some(language) = query.language() {
            request = request.param("language", language.as_str());
        }

        self.request(&request, *query.limit()).await?.into_records()
    }

    /// `GET /games` by name or id.
    #[instrument(skip(self, games))]
    pub async fn get_games<S: AsRef<str>>(&self, games: &[S]) -> HttpResult<Vec<Value>> {
        let (names, ids) = split_entries(games)?;
        let request = GovernedRequest::get("/games")
            .params(ids.into_iter().map(|id| ("id", id)))
            .params(names.into_iter().map(|name| ("name", name)));

        self.request(&request, None).await?.into_records()
    }

    /// Most viewed games, best first.
    #[instrument(skip(self))]
    pub async fn get_top_games(&self, limit: Option<usize>) -> HttpResult<Vec<Value>> {
        let request = GovernedRequest::get("/games/top");
        self.request(&request, limit).await?.into_records()
    }

    /// Subscribe to or unsubscribe from a webhook topic.
    #[instrument(skip(self, subscription), fields(topic = %subscription.topic()))]
    pub async fn modify_webhook_subscription(
        &self,
        subscription: &WebhookSubscription,
    ) -> HttpResult<ResponseBody> {
        let request = GovernedRequest::builder()
            .method(Method::POST)
            .path("/webhooks/hub")
            .body(subscription.to_body())
            .finish()?;
        self.execute(&request).await
    }

    /// Users currently in `channel`'s chat.
    ///
    /// Served by the legacy chat-presence endpoint, which carries no quota
    /// headers, so the client bucket is bypassed.
    #[instrument(skip(self))]
    pub async fn get_chatters(&self, channel: &str) -> HttpResult<Chatters> {
        let url = format!(
            "{}/group/user/{}/chatters",
            TMI_URL,
            normalize_channel(channel)
        );
        let request = GovernedRequest::get(url).unmetered();

        let response: ChattersResponse = match self.execute(&request).await? {
            ResponseBody::Structured(value) => serde_json::from_value(value),
            ResponseBody::RawText(text) => serde_json::from_str(&text),
        }
        .map_err(|e| HttpError::new(HttpErrorKind::Decode(e.to_string())))?;

        debug!(count = response.chatter_count, "Fetched chatters");
        Ok(response.into())
    }
}
