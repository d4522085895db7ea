/// Logger module for the Trend analysis system
///
/// Library code only emits `tracing` events; installing a subscriber is the
/// embedding application's call. This helper sets up a sensible default for
/// binaries that do not bring their own.
use tracing_subscriber::EnvFilter;

/// Installs a formatting subscriber filtered by `RUST_LOG`, defaulting to
/// debug output for this crate.
pub fn init_logger() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trend=debug")),
        )
        .try_init()
        .expect("Failed to initialize logger");
}
