//! Tracing subscriber setup.

use tracing_subscriber::{fmt, EnvFilter};

/// Install a fmt subscriber. `RUST_LOG` wins over `default_directives`.
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing(default_directives: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));
    let _ = fmt().with_env_filter(env_filter).try_init();
}
