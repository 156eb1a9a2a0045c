//! Interactive terminal application.

pub mod app;
mod entities;
pub mod error;
mod invoices;
pub mod output;
pub mod prompter;
pub mod render;
pub mod wizard_driver;

pub use app::{App, AppSettings};
pub use error::CliError;
pub use prompter::{Answer, DialoguerPrompter, Prompter, ScriptedPrompter};

use termsheet_config::{default_base_dir, ConfigManager};
use termsheet_storage_sqlite::SqliteStore;
use tracing::info;

/// Loads preferences, opens the database and runs the menus until the user quits.
pub fn run_cli() -> Result<(), CliError> {
    let base = default_base_dir();
    let manager = ConfigManager::with_base_dir(base.clone())?;
    let config = manager.load()?;
    if !manager.config_path().exists() {
        manager.save(&config)?;
    }

    let database = config.resolve_database_path(&base);
    let store = SqliteStore::open(&database)?;
    info!(database = %database.display(), "session started");

    let settings = AppSettings::from_config(&config);
    output::set_preferences(output::OutputPreferences {
        color: settings.render.color,
    });
    App::new(store, DialoguerPrompter::new(), settings).run()
}
