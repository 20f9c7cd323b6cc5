//! Structured logging setup for the command line tool.
//!
//! The library only emits `tracing` events; installing a subscriber is left to binaries.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `topic_index=debug`.
pub const LOG_ENV: &str = "TOPIC_INDEX_LOG";

/// Filter directive used when [`LOG_ENV`] is unset, derived from the `-v` count.
pub fn default_directive(verbosity: u8) -> &'static str {
  match verbosity {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  }
}

/// Install a stderr fmt subscriber.
///
/// Priority order: the [`LOG_ENV`] environment variable, then the verbosity count.
pub fn init_logging(verbosity: u8) -> Result<()> {
  let filter = EnvFilter::try_from_env(LOG_ENV)
    .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init()
    .map_err(|err| anyhow!("failed to initialise logging: {err}"))
}
