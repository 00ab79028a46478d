//! Logging infrastructure for CropCare.
//!
//! Provides centralized tracing setup for all binaries.

use crate::config::LogConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging with sensible defaults
///
/// Default level is INFO, but can be overridden with RUST_LOG env var.
pub fn init() {
    init_with_level("info")
}

/// Initialize logging with a specific default level
///
/// # Arguments
/// * `default_level` - Default log level (debug, info, warn, error)
///
/// This can still be overridden by RUST_LOG environment variable.
pub fn init_with_level(default_level: &str) {
    tracing_subscriber::registry()
        .with(filter_for(default_level))
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Initialize logging from the `[log]` config section
///
/// `format = "json"` switches to one JSON object per event.
pub fn init_from_config(config: &LogConfig) {
    if config.format == "json" {
        tracing_subscriber::registry()
            .with(filter_for(&config.level))
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        init_with_level(&config.level);
    }
}

fn filter_for(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Initialize logging for testing (captures logs for test output)
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
