//! termsheet-config
//!
//! Persistent user preferences for the termsheet terminal application.
//! Owns the Config data structure plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::{base_dir_from, default_base_dir, ConfigManager, HOME_ENV};
pub use model::Config;
