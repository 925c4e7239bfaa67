//! Logging setup shared by the binaries.

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber writing to stdout.
///
/// The level comes from `RUST_LOG` when set and defaults to `info`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}
