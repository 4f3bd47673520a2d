//! HTTP error types for the governed request path.

use derive_getters::Getters;

/// Specific HTTP failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum HttpErrorKind {
    /// The server answered with a status that is never retried.
    #[display("Failed to fulfil request ({}): {}", status, reason)]
    Status {
        /// HTTP status code
        status: u16,
        /// Server-provided reason phrase
        reason: String,
    },
    /// Every attempt failed with a transient status.
    #[display("Failed to reach Twitch API: {}", reason)]
    Unreachable {
        /// Reason observed on the last attempt
        reason: String,
    },
    /// The request never produced a response (connection, TLS, timeout).
    #[display("Transport failure: {}", _0)]
    Transport(String),
    /// A response body could not be decoded.
    #[display("Failed to decode response: {}", _0)]
    Decode(String),
    /// A lookup carried more entries than the API accepts in one call.
    #[display("Bad Request - Total entries must not exceed 100 (got {})", _0)]
    TooManyEntries(usize),
    /// A request descriptor could not be built.
    #[display("Invalid request: {}", _0)]
    Builder(String),
}

impl HttpErrorKind {
    /// Whether a response with this status is worth another attempt.
    pub fn is_retryable_status(status: u16) -> bool {
        matches!(status, 429 | 500..=504)
    }
}

/// HTTP error with source location tracking.
///
/// # Examples
///
/// ```
/// use twitchgate_error::{HttpError, HttpErrorKind};
///
/// let err = HttpError::new(HttpErrorKind::Status { status: 404, reason: "Not Found".into() });
/// assert!(format!("{}", err).contains("404"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("HTTP Error: {} at line {} in {}", kind, line, file)]
pub struct HttpError {
    kind: HttpErrorKind,
    line: u32,
    #[getter(skip)]
    file: &'static str,
}

impl HttpError {
    /// Source file where the error was created.
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// Create a new HttpError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: HttpErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl From<HttpErrorKind> for HttpError {
    #[track_caller]
    fn from(kind: HttpErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Result type for HTTP operations.
pub type HttpResult<T> = Result<T, HttpError>;
