//! Log subscriber installation.
//!
//! Library crates log through the `log` facade; the subscriber installed here
//! captures those records and writes them to stderr so stdout stays JSON.

use tracing_subscriber::EnvFilter;

use crate::CliError;

/// Filter directive for a `-v` count when `RUST_LOG` is unset.
pub(crate) const fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the stderr formatter.
pub(crate) fn init_logging(verbosity: u8) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(CliError::Logging)
}
