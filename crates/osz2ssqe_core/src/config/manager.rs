//! Settings file persistence.
//!
//! The file is written atomically: content goes to a sibling temp file
//! first, then renames over the destination. Section updates go through
//! `toml_edit`, so comments and tables the update does not own survive
//! the rewrite.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use toml_edit::{DocumentMut, Item};

use super::settings::{ConfigSection, Settings};

/// Errors from loading or persisting the settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read settings file: {0}")]
    ReadError(#[from] io::Error),

    #[error("Failed to parse settings: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize settings: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Failed to parse settings file for editing: {0}")]
    EditParseError(#[from] toml_edit::TomlError),

    #[error("Settings file not found: {}", .0.display())]
    NotFound(PathBuf),
}

/// Result type for settings persistence.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Owns the settings file path and the in-memory [`Settings`].
pub struct ConfigManager {
    config_path: PathBuf,
    settings: Settings,
}

impl ConfigManager {
    /// Manager for the settings file at `config_path`.
    ///
    /// Starts with defaults in memory; nothing is read until `load()` or
    /// `load_or_create()`.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            settings: Settings::default(),
        }
    }

    /// The settings file path.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// The settings currently in memory.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Mutable access to the in-memory settings.
    ///
    /// Changes reach the file only through `save()` or `update_section()`.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Load the settings file; a missing file is `NotFound`.
    pub fn load(&mut self) -> ConfigResult<()> {
        if !self.config_path.exists() {
            return Err(ConfigError::NotFound(self.config_path.clone()));
        }
        self.settings = toml::from_str(&fs::read_to_string(&self.config_path)?)?;
        Ok(())
    }

    /// Load the settings file, writing a default one when it is missing.
    pub fn load_or_create(&mut self) -> ConfigResult<()> {
        match self.load() {
            Err(ConfigError::NotFound(_)) => {
                self.settings = Settings::default();
                self.save()
            }
            other => other,
        }
    }

    /// Write the whole file, regenerated with its section comments.
    pub fn save(&self) -> ConfigResult<()> {
        let content = self.render_with_comments()?;
        self.atomic_write(&content)?;
        Ok(())
    }

    /// Rewrite one TOML table, leaving the rest of the file alone.
    ///
    /// The file is re-read from disk first, so comments and edits made
    /// outside this process survive; only the named table is replaced.
    pub fn update_section(&mut self, section: ConfigSection) -> ConfigResult<()> {
        let on_disk = if self.config_path.exists() {
            fs::read_to_string(&self.config_path)?
        } else {
            String::new()
        };

        let mut doc: DocumentMut = if on_disk.is_empty() {
            DocumentMut::new()
        } else {
            on_disk.parse()?
        };

        let rendered = match section {
            ConfigSection::Paths => toml::to_string_pretty(&self.settings.paths)?,
            ConfigSection::History => toml::to_string_pretty(&self.settings.history)?,
        };
        let table: DocumentMut = rendered.parse()?;
        doc[section.table_name()] = Item::Table(table.as_table().clone());

        self.atomic_write(&doc.to_string())?;
        Ok(())
    }

    fn render_with_comments(&self) -> ConfigResult<String> {
        let mut out = String::from("# osz2ssqe settings\n\n");

        out.push_str("# Where the editing tool lives and where bundles go\n");
        out.push_str("[paths]\n");
        out.push_str(&toml::to_string_pretty(&self.settings.paths)?);
        out.push('\n');

        out.push_str("# Recently converted archives\n");
        out.push_str("[history]\n");
        out.push_str(&toml::to_string_pretty(&self.settings.history)?);

        Ok(out)
    }

    /// Temp file next to the destination, then rename over it.
    fn atomic_write(&self, content: &str) -> io::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.config_path.with_extension("toml.tmp");
        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&temp_path, &self.config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn create_writes_default_file_with_all_tables() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nested").join("settings.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[paths]"));
        assert!(content.contains("[history]"));
        assert!(content.contains("editor_root"));
    }

    #[test]
    fn load_or_create_keeps_existing_values() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("settings.toml");
        fs::write(&config_path, "[paths]\neditor_root = \"/opt/ssqe\"\n").unwrap();

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        assert_eq!(manager.settings().paths.editor_root, "/opt/ssqe");
    }

    #[test]
    fn load_without_file_is_not_found() {
        let dir = tempdir().unwrap();
        let mut manager = ConfigManager::new(dir.path().join("settings.toml"));

        let err = manager.load().unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn update_section_leaves_other_tables_alone() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("settings.toml");
        fs::write(
            &config_path,
            "# hands off\n[paths]\neditor_root = \"/opt/ssqe\"\n",
        )
        .unwrap();

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();
        manager.settings_mut().remember_archive("/maps/a.osz");
        manager.update_section(ConfigSection::History).unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("/maps/a.osz"));
        // The paths table and the user's comment survive untouched.
        assert!(content.contains("editor_root = \"/opt/ssqe\""));
        assert!(content.contains("# hands off"));
    }

    #[test]
    fn save_then_reload_round_trips() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("settings.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();
        manager.settings_mut().paths.editor_root = "/opt/ssqe".to_string();
        manager.settings_mut().remember_archive("/maps/a.osz");
        manager.save().unwrap();

        let mut reloaded = ConfigManager::new(&config_path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.settings().paths.editor_root, "/opt/ssqe");
        assert_eq!(
            reloaded.settings().history.recent_archives,
            vec!["/maps/a.osz"]
        );
    }

    #[test]
    fn no_temp_file_left_behind() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("settings.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        assert!(!config_path.with_extension("toml.tmp").exists());
    }
}
