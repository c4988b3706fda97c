//! Persisted settings.
//!
//! Settings live in one TOML file split into logical tables. Writes are
//! atomic (temp file, then rename) and can target a single table, so
//! saving the history never rewrites the user's path settings.
//!
//! # Example
//!
//! ```no_run
//! use osz2ssqe_core::config::{ConfigManager, ConfigSection};
//!
//! let mut config = ConfigManager::new(".config/settings.toml");
//! config.load_or_create().unwrap();
//!
//! config.settings_mut().paths.editor_root = "/opt/ssqe".to_string();
//! config.update_section(ConfigSection::Paths).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{ConfigSection, HistorySettings, PathSettings, Settings};
