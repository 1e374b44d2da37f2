// src/logging.rs
// =============================================================================
// Logging setup.
//
// Diagnostics go through `tracing` and are written to stderr, so that
// `--json` output on stdout stays machine-readable. RUST_LOG overrides the
// default filter.
// =============================================================================

use tracing_subscriber::EnvFilter;

// Progress already goes to stdout, so info-level events stay hidden
// unless --verbose asks for them
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "warn,bookmark_guardian=debug"
    } else {
        "warn"
    }
}

/// Installs the global subscriber. Call once, at the top of main.
pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    // try_init: a second call (e.g. from tests) is a no-op instead of a panic
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
