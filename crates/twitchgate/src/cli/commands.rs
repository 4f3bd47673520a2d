//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// twitchgate - rate-governed Twitch Helix client
#[derive(Parser, Debug)]
#[command(name = "twitchgate")]
#[command(about = "Query the Twitch Helix API through a rate-governed session", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Application client id sent with every request
    #[arg(long, env = "TWITCH_CLIENT_ID", global = true, hide_env_values = true)]
    pub client_id: Option<String>,

    /// Configuration file to use instead of the default search path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up users by login or id
    Users {
        /// Logins or numeric ids (at most 100)
        #[arg(required = true)]
        users: Vec<String>,
    },

    /// List the follows pointing at a user
    Followers {
        /// Numeric user id
        user_id: String,
    },

    /// List the follows made by a user
    Following {
        /// Numeric user id
        user_id: String,
    },

    /// List live streams
    Streams {
        /// Channel logins or ids; all live streams when omitted
        channels: Vec<String>,

        /// Restrict to one game id
        #[arg(long)]
        game_id: Option<String>,

        /// Restrict to one broadcast language
        #[arg(long)]
        language: Option<String>,

        /// Maximum number of streams to return
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Look up games by name or id
    Games {
        /// Names or numeric ids (at most 100)
        #[arg(required = true)]
        games: Vec<String>,
    },

    /// List the most viewed games
    TopGames {
        /// Maximum number of games to return
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// List the users present in a channel's chat
    Chatters {
        /// Channel name, with or without `#`
        channel: String,
    },
}
