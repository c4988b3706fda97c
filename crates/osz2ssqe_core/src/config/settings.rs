//! The settings data model.
//!
//! Two tables: `[paths]` for where things live, `[history]` for the
//! recent-archives list. Each maps to one TOML table and persists
//! independently of the other.

use serde::{Deserialize, Serialize};

/// Most recent archives kept in the conversion history.
const RECENT_LIMIT: usize = 10;

/// Everything the tool persists between runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Directory locations.
    #[serde(default)]
    pub paths: PathSettings,

    /// Conversion history.
    #[serde(default)]
    pub history: HistorySettings,
}

impl Settings {
    /// Record an archive path in the recent history.
    ///
    /// Already-known paths stay where they are (re-converting does not
    /// reorder the list); new paths append at the end. The history keeps
    /// at most the 10 most recent entries.
    pub fn remember_archive(&mut self, path: impl Into<String>) {
        let path = path.into();
        if self.history.recent_archives.contains(&path) {
            return;
        }
        self.history.recent_archives.push(path);

        let len = self.history.recent_archives.len();
        if len > RECENT_LIMIT {
            self.history.recent_archives.drain(..len - RECENT_LIMIT);
        }
    }
}

/// Editor and output locations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathSettings {
    /// Root directory of the editing tool; the audio cache is written to
    /// its `cached` subdirectory. Empty until the user sets it.
    #[serde(default)]
    pub editor_root: String,

    /// Directory bundles are written under. Empty means the platform
    /// downloads directory.
    #[serde(default)]
    pub output_root: String,
}

/// Conversion history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistorySettings {
    /// Previously attempted archive paths, most recent last.
    #[serde(default)]
    pub recent_archives: Vec<String>,
}

/// One variant per TOML table, for section-scoped writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Paths,
    History,
}

impl ConfigSection {
    /// TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "paths",
            ConfigSection::History => "history",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_have_both_tables() {
        let toml = toml::to_string_pretty(&Settings::default()).unwrap();
        assert!(toml.contains("[paths]"));
        assert!(toml.contains("[history]"));
        assert!(toml.contains("editor_root"));
    }

    #[test]
    fn settings_round_trip() {
        let mut settings = Settings::default();
        settings.paths.editor_root = "/opt/ssqe".to_string();
        settings.remember_archive("/maps/a.osz");

        let toml = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.paths.editor_root, "/opt/ssqe");
        assert_eq!(parsed.history.recent_archives, vec!["/maps/a.osz"]);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let minimal = "[paths]\neditor_root = \"/opt/ssqe\"";
        let parsed: Settings = toml::from_str(minimal).unwrap();

        assert_eq!(parsed.paths.editor_root, "/opt/ssqe");
        // The keys the file does not carry fall back to defaults.
        assert_eq!(parsed.paths.output_root, "");
        assert!(parsed.history.recent_archives.is_empty());
    }

    #[test]
    fn remember_archive_skips_known_paths() {
        let mut settings = Settings::default();
        settings.remember_archive("/maps/a.osz");
        settings.remember_archive("/maps/b.osz");
        settings.remember_archive("/maps/a.osz");

        assert_eq!(
            settings.history.recent_archives,
            vec!["/maps/a.osz", "/maps/b.osz"]
        );
    }

    #[test]
    fn remember_archive_keeps_last_ten() {
        let mut settings = Settings::default();
        for i in 0..13 {
            settings.remember_archive(format!("/maps/{}.osz", i));
        }

        assert_eq!(settings.history.recent_archives.len(), 10);
        assert_eq!(settings.history.recent_archives[0], "/maps/3.osz");
        assert_eq!(settings.history.recent_archives[9], "/maps/12.osz");
    }
}
