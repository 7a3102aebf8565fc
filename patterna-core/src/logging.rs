//! Tracing subscriber bootstrap for binaries, benches and tests embedding Patterna

use tracing_subscriber::EnvFilter;

/// Environment variable holding the fallback log level
pub const LOG_ENV_VAR: &str = "PATTERNA_LOG";

/// Install a fmt subscriber.
///
/// `RUST_LOG` directives win; otherwise the level comes from `PATTERNA_LOG`,
/// then from `default_level`. Returns `false` when a global subscriber was
/// already installed, which is not an error.
pub fn init_logging(default_level: &str) -> bool {
    let log_level = std::env::var(LOG_ENV_VAR).unwrap_or_else(|_| default_level.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .with_target(false)
        .try_init()
        .is_ok()
}
