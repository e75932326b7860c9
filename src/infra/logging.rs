//! Tracing setup shared by the binaries.
//!
//! Verbosity comes from `RUST_LOG` (for example `RUST_LOG=stockroom=debug`), defaulting to
//! `info`.

use tracing_subscriber::EnvFilter;

pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // try_init: a second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .compact()
        .try_init();
}
