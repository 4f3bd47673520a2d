//! Helix query command handler.

use serde_json::Value;
use tracing::{debug, info, instrument};
use twitchgate::{
    ConfigError, ConfigErrorKind, HttpSession, HttpTransport, ReqwestTransport, StreamQuery,
    TwitchgateConfig,
};

use super::{Cli, Commands};

/// Load configuration, open a session and run the requested query.
///
/// Returns the result as JSON, ready for printing.
#[instrument(skip(cli), fields(command = ?cli.command))]
pub async fn run_query(cli: &Cli) -> Result<Value, Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => TwitchgateConfig::from_file(path)?,
        None => TwitchgateConfig::load()?,
    };
    debug!(base_url = %config.http.base_url, "Configuration loaded");

    let client_id = cli
        .client_id
        .as_deref()
        .ok_or_else(|| {
            ConfigError::new(ConfigErrorKind::Missing(
                "TWITCH_CLIENT_ID (use --client-id)".to_string(),
            ))
        })?;
    let session = HttpSession::new(ReqwestTransport::new(client_id)?, config.http);

    let output = dispatch(&session, &cli.command).await?;
    info!("Query complete");
    Ok(output)
}

async fn dispatch<T: HttpTransport>(
    session: &HttpSession<T>,
    command: &Commands,
) -> Result<Value, Box<dyn std::error::Error>> {
    let records = match command {
        Commands::Users { users } => session.get_users(users.as_slice()).await?,
        Commands::Followers { user_id } => session.get_followers(user_id).await?,
        Commands::Following { user_id } => session.get_following(user_id).await?,
        Commands::Streams {
            channels,
            game_id,
            language,
            limit,
        } => {
            let mut query = StreamQuery::builder();
            query.channels(channels.clone());
            if let Some(game_id) = game_id {
                query.game_id(game_id.as_str());
            }
            if let Some(language) = language {
                query.language(language.as_str());
            }
            if let Some(limit) = limit {
                query.limit(*limit);
            }
            session.get_streams(&query.build()?).await?
        }
        Commands::Games { games } => session.get_games(games.as_slice()).await?,
        Commands::TopGames { limit } => session.get_top_games(Some(*limit)).await?,
        Commands::Chatters { channel } => {
            return Ok(serde_json::to_value(session.get_chatters(channel).await?)?);
        }
    };

    debug!(records = records.len(), "Records fetched");
    Ok(Value::Array(records))
}
