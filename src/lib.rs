#![doc(test(attr(deny(warnings))))]

//! termsheet keeps providers, clients and invoices in an embedded SQLite
//! database and edits them through an interactive terminal application.

pub mod cli;
pub mod utils;

use std::sync::Once;

pub use cli::run_cli;
pub use utils::text::truncate_text;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("termsheet tracing initialized");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
