//! Tracing subscriber setup.

use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info,twitchgate=debug";

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Initialize console logging with the default filter.
///
/// `RUST_LOG` overrides the filter when set.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_console_telemetry() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(env_filter(DEFAULT_FILTER))
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;
    Ok(())
}

/// Initialize console logging for the CLI.
///
/// Verbose mode logs every crate of the workspace at `debug` and includes
/// span targets; otherwise only warnings and errors reach stderr so JSON on
/// stdout stays clean.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_telemetry(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let filter = if verbose { DEFAULT_FILTER } else { "warn" };

    tracing_subscriber::registry()
        .with(env_filter(filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose),
        )
        .try_init()?;

    debug!(verbose, "Telemetry initialized");
    Ok(())
}
