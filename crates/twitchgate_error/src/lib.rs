//! Error types for twitchgate.
//!
//! This crate provides the foundation error types used throughout the twitchgate workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use twitchgate_error::{HttpError, HttpErrorKind, TwitchgateResult};
//!
//! fn fetch_users() -> TwitchgateResult<String> {
//!     Err(HttpError::new(HttpErrorKind::Transport("Connection refused".into())))?
//! }
//!
//! match fetch_users() {
//!     Ok(body) => println!("Got: {}", body),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chat;
mod config;
mod error;
mod http;

pub use chat::{ChatError, ChatErrorKind, ChatResult};
pub use config::{ConfigError, ConfigErrorKind};
pub use error::{TwitchgateError, TwitchgateErrorKind, TwitchgateResult};
pub use http::{HttpError, HttpErrorKind, HttpResult};
