//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::config::ReflectorConfig;

/// Default filter directive when `RUST_LOG` is unset
pub fn default_directive(config: &ReflectorConfig) -> &'static str {
    if config.debug {
        "debug"
    } else {
        "info"
    }
}

/// Install a fmt subscriber for the process.
///
/// `RUST_LOG` takes precedence over the config. Returns false when a
/// global subscriber was already installed.
pub fn init_logging(config: &ReflectorConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
