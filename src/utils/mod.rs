pub mod build_info;
pub mod text;

use tracing_subscriber::{fmt, EnvFilter};

/// Applied when `RUST_LOG` is unset so log lines stay out of the prompts.
pub const DEFAULT_LOG_DIRECTIVE: &str = "termsheet=warn";

/// Installs the global tracing subscriber, writing to stderr.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE));

    // Another subscriber may already be installed (tests, embedding hosts).
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
