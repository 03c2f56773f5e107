//! Log output setup.

use tracing_subscriber::EnvFilter;

/// Installs a formatted `tracing` subscriber for the whole process.
///
/// The filter comes from `RUST_LOG` when set, otherwise from
/// `default_directive` (e.g. `"info"` or `"pao=debug,info"`).
///
/// Returns `false` if a global subscriber was already installed, in which
/// case nothing changes.
pub fn init(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
