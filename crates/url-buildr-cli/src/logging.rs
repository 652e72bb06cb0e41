//! Logging init: stderr only, filtered by `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber. Defaults to `warn` when `RUST_LOG` is unset.
pub fn init_logging_stderr() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
