//! Retry/backoff engine.

use reqwest::header::HeaderMap;
use std::time::Duration;
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, instrument, warn};
use twitchgate_error::{HttpError, HttpErrorKind, HttpResult};
use twitchgate_rate_limit::{Bucket, HttpConfig, RateLimitHeaders, ScopeKind, SharedBucket};

use crate::{GovernedRequest, HttpRequest, HttpTransport, RawResponse, ResponseBody};

/// Reason recorded for a 429 response.
const RATE_LIMIT_REASON: &str = "Ratelimit Reached";

/// Helix session: one transport, one client-wide bucket, one retry policy.
///
/// The bucket is shared by every call made through the session, so
/// concurrent callers wait on the same window.
#[derive(Debug)]
pub struct HttpSession<T> {
    transport: T,
    config: HttpConfig,
    bucket: SharedBucket,
}

impl<T: HttpTransport> HttpSession<T> {
    /// Create a session whose bucket starts from the configured quota.
    pub fn new(transport: T, config: HttpConfig) -> Self {
        debug!(base_url = %config.base_url, "Creating HTTP session");
        let bucket = SharedBucket::new(Bucket::for_scope(ScopeKind::Http, &config.quota));
        Self {
            transport,
            config,
            bucket,
        }
    }

    /// The client-wide bucket.
    pub fn bucket(&self) -> &SharedBucket {
        &self.bucket
    }

    /// Session configuration.
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Execute one logical request with retries.
    ///
    /// # Errors
    ///
    /// - [`HttpErrorKind::Status`] for a non-retryable status
    /// - [`HttpErrorKind::Unreachable`] once every attempt failed transiently
    /// - [`HttpErrorKind::Transport`] if the transport produced no response
    /// - [`HttpErrorKind::Decode`] for a JSON body that does not parse
    #[instrument(skip(self, request), fields(method = %request.method(), path = %request.path()))]
    pub async fn execute(&self, request: &GovernedRequest) -> HttpResult<ResponseBody> {
        self.execute_with_query(request, request.query().clone())
            .await
    }

    /// Execute `request` with `query` in place of its own parameters.
    ///
    /// Each attempt picks its own delay through `retry_after`; the strategy
    /// only bounds the number of retries. The final attempt reports
    /// [`HttpErrorKind::Unreachable`] as permanent so no sleep follows it.
    pub(crate) async fn execute_with_query(
        &self,
        request: &GovernedRequest,
        query: Vec<(String, String)>,
    ) -> HttpResult<ResponseBody> {
        let http_request = HttpRequest {
            method: request.method().clone(),
            url: self.url_for(request.path()),
            query,
            body: request.body().clone(),
        };
        let http_request = &http_request;
        let use_bucket = *request.use_bucket();
        let max_attempts = self.config.retry.max_attempts.max(1);

        let strategy = std::iter::repeat(Duration::ZERO).take(max_attempts as usize - 1);
        let mut attempt = 0;
        Retry::spawn(strategy, move || {
            let current = attempt;
            attempt += 1;
            self.attempt(http_request, use_bucket, current, max_attempts)
        })
        .await
    }

    /// One attempt, classified for the retry strategy.
    async fn attempt(
        &self,
        request: &HttpRequest,
        use_bucket: bool,
        attempt: u32,
        max_attempts: u32,
    ) -> Result<ResponseBody, RetryError<HttpError>> {
        let retry = self.config.retry;
        let last_attempt = attempt + 1 >= max_attempts;

        if use_bucket {
            self.bucket.wait_if_limited().await;
        }

        let response = self
            .transport
            .send(request)
            .await
            .map_err(RetryError::Permanent)?;
        let status = response.status;

        if (500..=504).contains(&status) {
            if use_bucket {
                self.apply_headers(&response.headers, false).await;
            }
            warn!(status, attempt, reason = %response.reason, "Server error, will retry");
            return Err(transient(
                response.reason,
                retry.server_error_backoff(attempt),
                last_attempt,
            ));
        }

        if use_bucket {
            self.apply_headers(&response.headers, true).await;
        }

        if (200..300).contains(&status) {
            debug!(status, attempt, "Request succeeded");
            return decode(response).map_err(RetryError::Permanent);
        }

        if !HttpErrorKind::is_retryable_status(status) {
            warn!(status, reason = %response.reason, "Request failed permanently");
            return Err(RetryError::Permanent(HttpError::new(HttpErrorKind::Status {
                status,
                reason: response.reason,
            })));
        }

        // Only 429 remains.
        let delay = if use_bucket {
            // The 429 itself says the window is spent, headers or not.
            let mut bucket = self.bucket.lock().await;
            if !bucket.is_limited() {
                bucket.refresh(None, Some(0));
            }
            warn!(attempt, "Rate limited, next attempt waits for the bucket");
            Duration::ZERO
        } else {
            warn!(attempt, "Rate limited on unmetered endpoint, backing off");
            retry.rate_limit_backoff(attempt)
        };
        Err(transient(RATE_LIMIT_REASON.to_string(), delay, last_attempt))
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
        }
    }

    async fn apply_headers(&self, headers: &HeaderMap, count_call: bool) {
        let detected = RateLimitHeaders::from_headers(headers);
        let reset = detected.reset_instant();
        let mut bucket = self.bucket.lock().await;

        if let Some(limit) = detected.limit {
            bucket.adopt_capacity(limit);
        }
        if count_call {
            bucket.update(reset, detected.remaining);
        } else {
            bucket.refresh(reset, detected.remaining);
        }
    }
}

/// Retry after `delay`, or give up with `reason` once the budget is spent.
fn transient(reason: String, delay: Duration, last_attempt: bool) -> RetryError<HttpError> {
    let err = HttpError::new(HttpErrorKind::Unreachable { reason });
    if last_attempt {
        warn!(%err, "Retry budget exhausted");
        RetryError::Permanent(err)
    } else {
        RetryError::Transient {
            err,
            retry_after: Some(delay),
        }
    }
}

fn decode(response: RawResponse) -> HttpResult<ResponseBody> {
    if response.is_json() {
        serde_json::from_str(&response.body)
            .map(ResponseBody::Structured)
            .map_err(|e| HttpError::new(HttpErrorKind::Decode(e.to_string())))
    } else {
        Ok(ResponseBody::RawText(response.body))
    }
}
