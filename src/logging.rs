//! Log output for the driver and anything else embedding the crate.

use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

use crate::errors::*;

/// Install a global subscriber writing human readable lines to stderr, so stdout stays free for
/// the maze itself. `RUST_LOG` wins over the default level, which is `warn` when `quiet` and
/// `info` otherwise.
///
/// Fails with `LoggingInit` if a global subscriber is already installed.
pub fn init_logging(quiet: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(quiet))
        .with_writer(std::io::stderr)
        .finish()
        .try_init()?;
    Ok(())
}

fn env_filter(quiet: bool) -> EnvFilter {
    let default_level = if quiet { "warn" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}
