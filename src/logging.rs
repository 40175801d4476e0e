//! Tracing setup for the finpulse binary

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_DIRECTIVE: &str = "finpulse=warn";

/// Initializes the global tracing subscriber, writing to stderr
///
/// `RUST_LOG` wins when set; otherwise `verbose` lowers the level to `info`.
/// Safe to call more than once.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let fallback = if verbose { "finpulse=info" } else { DEFAULT_DIRECTIVE };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

        // A subscriber installed by an embedding application takes precedence
        let _ = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
