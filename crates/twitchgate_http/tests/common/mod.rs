//! Scripted transports shared by the HTTP tests.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Mutex;
use twitchgate_error::{HttpError, HttpErrorKind, HttpResult};
use twitchgate_http::{HttpRequest, HttpSession, HttpTransport, RawResponse};
use twitchgate_rate_limit::HttpConfig;

/// Replays canned responses in order and records every request.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<RawResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new(responses: impl IntoIterator<Item = RawResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: &HttpRequest) -> HttpResult<RawResponse> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| HttpError::new(HttpErrorKind::Transport("script exhausted".into())))
    }
}

/// Serves a fixed record stream split into cursor-linked pages.
///
/// Honors `first` and `after` the way Helix does.
#[derive(Debug)]
pub struct PagedFixture {
    pages: Vec<Vec<Value>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl PagedFixture {
    /// Pages of `sizes` records; record ids run 0.. across pages.
    pub fn with_page_sizes(sizes: &[usize]) -> Self {
        let mut next_id = 0;
        let pages = sizes
            .iter()
            .map(|&size| {
                (0..size)
                    .map(|_| {
                        next_id += 1;
                        json!({ "id": next_id - 1 })
                    })
                    .collect()
            })
            .collect();
        Self {
            pages,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

fn param<'a>(request: &'a HttpRequest, key: &str) -> Option<&'a str> {
    request
        .query
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[async_trait]
impl HttpTransport for PagedFixture {
    async fn send(&self, request: &HttpRequest) -> HttpResult<RawResponse> {
        self.requests.lock().unwrap().push(request.clone());

        let index = match param(request, "after") {
            None => 0,
            Some(cursor) => cursor.trim_start_matches('c').parse().unwrap(),
        };
        let first: usize = param(request, "first").unwrap().parse().unwrap();
        let data: Vec<Value> = self.pages[index].iter().take(first).cloned().collect();

        let next = index + 1;
        let pagination = if next < self.pages.len() {
            json!({ "cursor": format!("c{}", next) })
        } else {
            json!({})
        };
        Ok(RawResponse::json(
            200,
            &json!({ "data": data, "pagination": pagination }),
        ))
    }
}

pub fn session<T: HttpTransport>(transport: T) -> HttpSession<T> {
    HttpSession::new(transport, HttpConfig::default())
}

pub fn ok_json(value: Value) -> RawResponse {
    RawResponse::json(200, &value)
}

pub fn status(code: u16) -> RawResponse {
    RawResponse::new(code, "")
}

pub fn ids(records: &[Value]) -> Vec<u64> {
    records.iter().map(|r| r["id"].as_u64().unwrap()).collect()
}
