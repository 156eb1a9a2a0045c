use termsheet_config::Config;
use termsheet_core::{CommitPolicy, EntityStore, InvoiceStore};
use termsheet_domain::EntityKind;
use tracing::debug;

use super::{entities, invoices, output, prompter::Prompter, render::RenderStyle, CliError};

/// Per-session preferences derived from [`Config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub render: RenderStyle,
    pub commit_policy: CommitPolicy,
    pub confirm_deletes: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl AppSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            render: RenderStyle {
                currency_symbol: config.currency_symbol.clone(),
                color: config.ui_color_enabled,
            },
            commit_policy: CommitPolicy::from_atomic_flag(config.atomic_commits),
            confirm_deletes: config.confirm_deletes,
        }
    }
}

const MAIN_MENU: [&str; 4] = ["Providers", "Clients", "Invoices", "Quit"];

/// The interactive application: a main menu over the entity and invoice views.
pub struct App<S, P> {
    pub(crate) store: S,
    pub(crate) prompter: P,
    pub(crate) settings: AppSettings,
}

impl<S, P> App<S, P>
where
    S: EntityStore + InvoiceStore,
    P: Prompter,
{
    pub fn new(store: S, prompter: P, settings: AppSettings) -> Self {
        Self {
            store,
            prompter,
            settings,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    /// Runs until the user quits. Failed operations are reported and the
    /// user stays in the menus; only terminal I/O failures end the session.
    pub fn run(&mut self) -> Result<(), CliError> {
        let items: Vec<String> = MAIN_MENU.iter().map(|item| item.to_string()).collect();
        loop {
            self.prompter.begin_view("termsheet")?;
            let choice = self.prompter.select("Main Menu", &items, 0)?;
            debug!(?choice, "main menu");
            let outcome = match choice {
                Some(0) => entities::list_view(self, EntityKind::Provider),
                Some(1) => entities::list_view(self, EntityKind::Client),
                Some(2) => invoices::list_view(self),
                _ => break,
            };
            recover(outcome)?;
        }
        Ok(())
    }
}

/// Reports a failed store operation and keeps the session alive.
pub(crate) fn recover(result: Result<(), CliError>) -> Result<(), CliError> {
    match result {
        Err(CliError::Core(err)) => {
            output::error(&err);
            Ok(())
        }
        other => other,
    }
}
