//! Governed request descriptors.

use derive_getters::Getters;
use reqwest::Method;
use serde_json::Value;
use twitchgate_error::{HttpError, HttpErrorKind, HttpResult};

/// One logical request, before base-URL resolution and pagination.
///
/// Query parameters are an ordered list: Helix accepts repeated keys
/// (`id=1&id=2`) and retries must resend them in the same order.
///
/// # Example
///
/// ```
/// use twitchgate_http::GovernedRequest;
///
/// let request = GovernedRequest::get("/users")
///     .param("login", "forsen")
///     .param("login", "xqc");
/// assert_eq!(request.query().len(), 2);
/// assert!(*request.use_bucket());
/// ```
#[derive(Debug, Clone, PartialEq, derive_builder::Builder, Getters)]
#[builder(setter(into))]
pub struct GovernedRequest {
    /// HTTP method
    #[builder(default = "Method::GET")]
    method: Method,
    /// Path relative to the configured base URL, or an absolute URL
    path: String,
    /// Ordered query parameters
    #[builder(default)]
    query: Vec<(String, String)>,
    /// Optional JSON body
    #[builder(default, setter(into, strip_option))]
    body: Option<Value>,
    /// Whether the client-wide bucket governs this request
    #[builder(default = "true")]
    use_bucket: bool,
}

impl GovernedRequest {
    /// Start building a request.
    pub fn builder() -> GovernedRequestBuilder {
        GovernedRequestBuilder::default()
    }

    /// Metered GET request for `path` with no parameters.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: Vec::new(),
            body: None,
            use_bucket: true,
        }
    }

    /// Append one query parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append several query parameters in order.
    pub fn params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Bypass bucket accounting (for endpoints without quota headers).
    pub fn unmetered(mut self) -> Self {
        self.use_bucket = false;
        self
    }
}

impl GovernedRequestBuilder {
    /// Build the request, mapping builder failures into [`HttpError`].
    pub fn finish(&self) -> HttpResult<GovernedRequest> {
        self.build()
            .map_err(|e| HttpError::new(HttpErrorKind::Builder(e.to_string())))
    }
}
