//! Diagnostic logging setup for the binary

use tracing_subscriber::EnvFilter;

use crate::io::configuration::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};

/// Filter directive for the given verbosity flags
///
/// `quiet` wins over any number of `-v` flags.
pub const fn filter_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => DEFAULT_LOG_FILTER,
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the stderr subscriber
///
/// The filter comes from the `PUZZLEME_LOG` environment variable when it is
/// set and valid, otherwise from the verbosity flags. Returns `false` when a
/// global subscriber was already installed, which leaves that one in place.
pub fn init_logging(verbose: u8, quiet: bool) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbose, quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
