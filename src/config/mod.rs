//! Configuration module for templar
//!
//! Settings are read from `config.toml` in the user's config directory and
//! can be overridden with `TEMPLAR_*` environment variables
//! (`TEMPLAR_DEBOUNCE_MS=350`). A missing file means defaults.

use crate::query::{DEFAULT_DEBOUNCE, EngineOptions, FileLocation, SortKey};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Smallest and largest list row height, in terminal lines
pub const ROW_HEIGHT_RANGE: (u16, u16) = (1, 3);

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TemplarConfig {
    /// Dataset to load instead of the bundled sample catalog
    pub dataset: Option<PathBuf>,

    /// Quiet period before typed text is searched
    pub debounce_ms: u64,

    /// Sort used by `templar search` when `--sort` is not given
    pub default_sort: SortKey,

    /// Where the browse view keeps its query string
    pub location_file: Option<PathBuf>,

    /// Whether "clear all" also returns to all use cases
    pub clear_resets_use_case: bool,

    /// Lines per result row
    pub row_height: u16,
}

impl Default for TemplarConfig {
    fn default() -> Self {
        Self {
            dataset: None,
            debounce_ms: u64::try_from(DEFAULT_DEBOUNCE.as_millis()).unwrap_or(200),
            default_sort: SortKey::default(),
            location_file: None,
            clear_resets_use_case: false,
            row_height: 2,
        }
    }
}

impl TemplarConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("templar").join("config.toml"))
    }

    /// Load the config file plus environment overrides
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file exists but cannot be parsed,
    /// or an override has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;
        Self::build(&config_path, true)
    }

    /// Load only the given file, ignoring the environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::build(path, false)
    }

    fn build(path: &Path, with_env: bool) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false));
        if with_env {
            builder = builder.add_source(Environment::with_prefix("TEMPLAR").try_parsing(true));
        }
        builder.build()?.try_deserialize()
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created, the
    /// configuration cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))
    }

    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Row height clamped to the supported range
    #[must_use]
    pub fn row_height(&self) -> u16 {
        self.row_height.clamp(ROW_HEIGHT_RANGE.0, ROW_HEIGHT_RANGE.1)
    }

    /// Configured location file, or the default in the cache directory
    #[must_use]
    pub fn location_path(&self) -> Option<PathBuf> {
        self.location_file.clone().or_else(FileLocation::default_path)
    }

    #[must_use]
    pub const fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            debounce: self.debounce(),
            clear_resets_use_case: self.clear_resets_use_case,
        }
    }

    /// Log file used while the terminal UI owns the screen
    #[must_use]
    pub fn log_path() -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join("templar").join("templar.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TemplarConfig::default();
        assert!(config.dataset.is_none());
        assert_eq!(config.debounce(), Duration::from_millis(200));
        assert_eq!(config.default_sort, SortKey::Popularity);
        assert!(!config.clear_resets_use_case);
        assert_eq!(config.row_height(), 2);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = TemplarConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, TemplarConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "debounce_ms = 350\ndefault_sort = \"setup_time\"\n").unwrap();

        let config = TemplarConfig::load_from(&path).unwrap();
        assert_eq!(config.debounce_ms, 350);
        assert_eq!(config.default_sort, SortKey::SetupTime);
        assert_eq!(config.row_height, 2);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = TemplarConfig {
            dataset: Some(PathBuf::from("/tmp/catalog.json")),
            clear_resets_use_case: true,
            ..TemplarConfig::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(TemplarConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_row_height_is_clamped() {
        let mut config = TemplarConfig {
            row_height: 0,
            ..TemplarConfig::default()
        };
        assert_eq!(config.row_height(), 1);
        config.row_height = 9;
        assert_eq!(config.row_height(), 3);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "debounce_ms = \"soon\"").unwrap();
        assert!(TemplarConfig::load_from(&path).is_err());
    }
}
