//! Decoded response bodies.

use serde_json::Value;
use twitchgate_error::{HttpError, HttpErrorKind, HttpResult};

/// Body of one successful response.
///
/// Most endpoints answer with JSON; a few legacy ones answer with plain text,
/// which pagination passes straight through.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Body whose content type was not JSON.
    RawText(String),
    /// Decoded JSON document.
    Structured(Value),
}

/// Result of a possibly paginated call.
#[derive(Debug, Clone, PartialEq)]
pub enum Collected {
    /// Plain-text endpoint, returned without aggregation.
    RawText(String),
    /// JSON document without a `data` array (non-paginated endpoint).
    Document(Value),
    /// `data` records concatenated across pages, in server order.
    Records(Vec<Value>),
}

impl Collected {
    /// Records of the call.
    ///
    /// A non-paginated array document yields its elements and any other
    /// document yields itself.
    ///
    /// # Errors
    ///
    /// Fails with [`HttpErrorKind::Decode`] for plain-text responses.
    pub fn into_records(self) -> HttpResult<Vec<Value>> {
        match self {
            Collected::Records(records) => Ok(records),
            Collected::Document(Value::Array(items)) => Ok(items),
            Collected::Document(document) => Ok(vec![document]),
            Collected::RawText(text) => Err(HttpError::new(HttpErrorKind::Decode(format!(
                "expected JSON records, got text ({} bytes)",
                text.len()
            )))),
        }
    }
}
