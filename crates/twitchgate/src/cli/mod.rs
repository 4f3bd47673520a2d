//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the twitchgate binary.

mod commands;
mod query;

pub use commands::{Cli, Commands};
pub use query::run_query;
