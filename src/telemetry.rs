//! Structured logging bootstrap.

use tracing_subscriber::EnvFilter;

/// Directive used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_DIRECTIVE: &str = "factoria=info";

/// Installs a formatted subscriber writing to standard error.
///
/// The filter comes from `RUST_LOG`, falling back to `default_directive`.
/// Returns `false` when a global subscriber was already installed, which
/// leaves the existing one in place.
#[must_use]
pub fn init_tracing(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
