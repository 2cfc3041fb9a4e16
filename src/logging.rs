//! Tracing subscriber setup for binaries and tests.

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to `info`
/// (or `debug` when `verbose`). Later calls are no-ops.
pub fn init(verbose: bool) {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(directives.as_deref(), verbose))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Filter from explicit directives when they are set and parse, otherwise the
/// default level.
fn env_filter(directives: Option<&str>, verbose: bool) -> EnvFilter {
    let default_level = if verbose { "debug" } else { "info" };

    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(default_level))
}
