//! `tracing` subscriber bootstrap.

use tracing_subscriber::EnvFilter;

/// Directive used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,dockforge_dock=debug,winit=info";

/// Install the global fmt subscriber, honouring `RUST_LOG` when present.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    install(filter);
}

/// Install the global fmt subscriber with an explicit filter directive.
pub fn init_with_filter(directive: &str) {
    install(EnvFilter::new(directive));
}

fn install(filter: EnvFilter) {
    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
        tracing::trace!("tracing subscriber already installed");
    }
}
