//! Diagnostic logging setup using `tracing-subscriber`.
//!
//! Diagnostics go to stderr so they never mix with console-sink output on
//! stdout. `RUST_LOG` takes precedence over the configured level.

use tracing_subscriber::EnvFilter;

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG` or `default_level`.
///
/// Returns `false` if a global subscriber was already installed; the
/// existing one is kept.
pub fn init_cli(default_level: &str) -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
