use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const DATABASE_FILE: &str = "termsheet.db";

/// User preferences. Missing keys fall back to their defaults so older
/// files keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Custom database file. Defaults to `termsheet.db` in the base directory.
    pub database_path: Option<PathBuf>,
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "Config::default_true")]
    pub ui_color_enabled: bool,
    /// Commit each invoice in a single transaction.
    #[serde(default = "Config::default_true")]
    pub atomic_commits: bool,
    #[serde(default = "Config::default_true")]
    pub confirm_deletes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            currency_symbol: Self::default_currency_symbol(),
            ui_color_enabled: true,
            atomic_commits: true,
            confirm_deletes: true,
        }
    }
}

impl Config {
    pub fn default_currency_symbol() -> String {
        "$".into()
    }

    fn default_true() -> bool {
        true
    }

    pub fn resolve_database_path(&self, base: &Path) -> PathBuf {
        match &self.database_path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => base.join(path),
            None => base.join(DATABASE_FILE),
        }
    }
}
