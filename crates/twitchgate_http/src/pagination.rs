//! Cursor pagination over the retry engine.
//!
//! Helix pages look like `{ "data": [...], "pagination": { "cursor": "..." } }`
//! and hold at most 100 records. Each physical request appends `first`
//! (page size) and, after the first page, `after` (cursor) to the caller's
//! parameters; the caller's list itself is never modified.

use serde_json::Value;
use tracing::{debug, instrument};
use twitchgate_error::HttpResult;

use crate::{Collected, GovernedRequest, HttpSession, HttpTransport, ResponseBody};

impl<T: HttpTransport> HttpSession<T> {
    /// Fetch `request`, following cursors until the stream ends or `limit`
    /// records have been collected. `None` fetches everything.
    ///
    /// Page sizes never request more than the records still wanted, so a
    /// limit below one page costs a single, smaller request.
    #[instrument(skip(self, request), fields(path = %request.path()))]
    pub async fn request(
        &self,
        request: &GovernedRequest,
        limit: Option<usize>,
    ) -> HttpResult<Collected> {
        let page_size = self.config().page_size.max(1);
        let mut records: Vec<Value> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let wanted = match limit {
                Some(limit) if records.len() >= limit => break,
                Some(limit) => (limit - records.len()).min(page_size),
                None => page_size,
            };

            let mut query = request.query().clone();
            query.push(("first".to_string(), wanted.to_string()));
            if let Some(cursor) = &cursor {
                query.push(("after".to_string(), cursor.clone()));
            }

            let mut document = match self.execute_with_query(request, query).await? {
                ResponseBody::RawText(text) => return Ok(Collected::RawText(text)),
                ResponseBody::Structured(document) => document,
            };
            pages += 1;

            let page = document
                .get_mut("data")
                .and_then(Value::as_array_mut)
                .map(std::mem::take);
            let page = match page {
                Some(page) => page,
                None if pages == 1 => return Ok(Collected::Document(document)),
                None => break,
            };

            if page.is_empty() {
                debug!(pages, "Empty page, stream ended");
                break;
            }
            records.extend(page);

            cursor = next_cursor(&document);
            if cursor.is_none() {
                debug!(pages, "No cursor, stream ended");
                break;
            }
        }

        if let Some(limit) = limit {
            records.truncate(limit);
        }
        debug!(pages, records = records.len(), "Pagination complete");
        Ok(Collected::Records(records))
    }
}

fn next_cursor(document: &Value) -> Option<String> {
    document
        .get("pagination")?
        .get("cursor")?
        .as_str()
        .filter(|cursor| !cursor.is_empty())
        .map(str::to_owned)
}
