//! Transport seam between the governor and the network.
//!
//! The retry engine only needs "perform one HTTP call, return
//! status/headers/body"; [`HttpTransport`] is that contract, and
//! [`ReqwestTransport`] the production implementation.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::{debug, error, instrument};
use twitchgate_error::{HttpError, HttpErrorKind, HttpResult};

/// Header identifying the application on every Helix call.
pub const CLIENT_ID_HEADER: &str = "client-id";

/// A fully resolved request for one attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL
    pub url: String,
    /// Ordered query parameters
    pub query: Vec<(String, String)>,
    /// Optional JSON body
    pub body: Option<Value>,
}

/// Status, headers and undecoded body of one response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Reason phrase for the status
    pub reason: String,
    /// Response headers
    pub headers: HeaderMap,
    /// Body text
    pub body: String,
}

impl RawResponse {
    /// Response with the given status and body and no headers.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        let reason = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown")
            .to_string();
        Self {
            status,
            reason,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// JSON response carrying `value`.
    pub fn json(status: u16, value: &Value) -> Self {
        let mut response = Self::new(status, value.to_string());
        response
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        response
    }

    /// Add a header, ignoring values that are not valid header text.
    pub fn with_header(mut self, name: &'static str, value: impl AsRef<str>) -> Self {
        if let Ok(value) = HeaderValue::from_str(value.as_ref()) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Whether the body is declared as JSON.
    pub fn is_json(&self) -> bool {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.trim_start().starts_with("application/json"))
    }
}

/// Performs single HTTP calls for the governed session.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send one request and return the raw response, whatever its status.
    ///
    /// Errors are reserved for calls that produced no response at all.
    async fn send(&self, request: &HttpRequest) -> HttpResult<RawResponse>;
}

/// [`HttpTransport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Client sending `Client-ID: <client_id>` on every request.
    pub fn new(client_id: &str) -> HttpResult<Self> {
        debug!("Creating reqwest transport");
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(client_id).map_err(|e| {
            HttpError::new(HttpErrorKind::Builder(format!("invalid client id: {}", e)))
        })?;
        headers.insert(CLIENT_ID_HEADER, value);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| HttpError::new(HttpErrorKind::Transport(e.to_string())))?;
        Ok(Self { client })
    }

    /// Use a preconfigured client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: &HttpRequest) -> HttpResult<RawResponse> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .query(&request.query);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            error!(error = ?e, "Request failed before a response arrived");
            HttpError::new(HttpErrorKind::Transport(e.to_string()))
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .map_err(|e| HttpError::new(HttpErrorKind::Transport(e.to_string())))?;

        debug!(status = status.as_u16(), bytes = body.len(), "Received response");
        Ok(RawResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            headers,
            body,
        })
    }
}
