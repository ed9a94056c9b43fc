//! Structured logging setup.
//!
//! Output goes to stderr so JSON written to stdout stays machine-readable.
//! `RUST_LOG` takes precedence over the level passed on the command line.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing once. Later calls are ignored.
pub fn init_tracing(default_level: &str) {
    let fallback = default_level.to_string();
    TRACING_INIT.call_once(move || {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&fallback));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .compact();

        let _ = subscriber.try_init();
    });
}
