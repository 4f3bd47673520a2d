//! Governed access to the Helix REST API.
//!
//! Every call goes through [`HttpSession`], which owns the client-wide
//! [`SharedBucket`](twitchgate_rate_limit::SharedBucket) and applies the retry
//! policy:
//!
//! - 500-504 responses are retried with `2^n + 1` second backoff
//! - 429 responses wait on the bucket, or back off `3^n + 1` seconds on
//!   endpoints that bypass it
//! - any other non-2xx status fails immediately
//!
//! [`HttpSession::request`] layers cursor pagination on top, concatenating
//! `data` pages until the stream ends or a record limit is reached.
//!
//! ```rust,ignore
//! use twitchgate_http::{HttpSession, ReqwestTransport};
//! use twitchgate_rate_limit::TwitchgateConfig;
//!
//! let config = TwitchgateConfig::load()?;
//! let session = HttpSession::new(ReqwestTransport::new("my-client-id")?, config.http);
//! let games = session.get_top_games(Some(250)).await?;
//! ```

mod api;
mod body;
mod pagination;
mod request;
mod session;
mod transport;

pub use api::{
    Chatters, StreamQuery, StreamQueryBuilder, WebhookMode, WebhookSubscription, split_entries,
};
pub use body::{Collected, ResponseBody};
pub use request::{GovernedRequest, GovernedRequestBuilder};
pub use session::HttpSession;
pub use transport::{HttpRequest, HttpTransport, RawResponse, ReqwestTransport};
