//! twitchgate CLI binary.
//!
//! Runs one Helix query through a rate-governed session and prints the
//! result as JSON on stdout. Logs go to stderr.

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, run_query};

    // Load .env before clap reads TWITCH_CLIENT_ID
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    twitchgate::init_telemetry(cli.verbose)?;

    let output = run_query(&cli).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
