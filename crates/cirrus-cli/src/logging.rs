//! Logging setup

use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber
///
/// `CIRRUS_LOG` wins over the `--log-level` flag when set.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_env("CIRRUS_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
