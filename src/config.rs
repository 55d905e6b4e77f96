use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::markup::{DEFAULT_STYLESHEET_HREF, DEFAULT_TITLE};

// Default configuration
pub const DEFAULT_CONNECT_DELAY_MS: u64 = 5000;
pub const DEFAULT_THEME: &str = "dark";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine a configuration directory")]
    NoConfigDir,
    #[error("settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persisted settings for the embedded wallet dialog.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Name shown in bold in the dialog heading
    pub title: String,
    pub stylesheet_href: String,
    /// Duration of the mocked handshake
    pub connect_delay_ms: u64,
    /// "dark" or "light"
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            stylesheet_href: DEFAULT_STYLESHEET_HREF.to_string(),
            connect_delay_ms: DEFAULT_CONNECT_DELAY_MS,
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

impl Settings {
    pub fn connect_delay(&self) -> Duration {
        Duration::from_millis(self.connect_delay_ms)
    }
}

pub fn settings_path() -> Result<PathBuf, ConfigError> {
    let proj = ProjectDirs::from("com", "solana-mobile", "mwa-embedded-modal")
        .ok_or(ConfigError::NoConfigDir)?;
    let dir = proj.config_dir();
    fs::create_dir_all(dir)?;
    Ok(dir.join("settings.json"))
}

/// Load settings from the platform config directory, writing a default
/// file on first run.
pub fn load_or_init_settings() -> Settings {
    match settings_path() {
        Ok(path) => load_or_init_settings_at(&path),
        Err(e) => {
            tracing::warn!("using default settings: {}", e);
            Settings::default()
        }
    }
}

/// Load settings from `path`. A missing file is created with the defaults;
/// an unreadable one is left in place and the defaults are used.
pub fn load_or_init_settings_at(path: &Path) -> Settings {
    match load_settings_from(path) {
        Ok(settings) => settings,
        Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            let settings = Settings::default();
            match save_settings_to(path, &settings) {
                Ok(()) => tracing::info!(path = %path.display(), "wrote default settings"),
                Err(e) => tracing::warn!("failed to write default settings: {}", e),
            }
            settings
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "using default settings: {}", e);
            Settings::default()
        }
    }
}

/// Load settings from `path`. Fields missing from the file take their defaults.
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
    let data = serde_json::to_string_pretty(settings)?;
    let mut file = fs::File::create(path)?;
    file.write_all(data.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.title, "Jupiter");
        assert_eq!(settings.connect_delay(), Duration::from_secs(5));
        assert_eq!(settings.stylesheet_href, DEFAULT_STYLESHEET_HREF);
        assert_eq!(settings.theme, "dark");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            title: "Orca".into(),
            connect_delay_ms: 250,
            ..Settings::default()
        };
        save_settings_to(&path, &settings).unwrap();
        assert_eq!(load_settings_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "title": "Raydium" }"#).unwrap();
        let settings = load_settings_from(&path).unwrap();
        assert_eq!(settings.title, "Raydium");
        assert_eq!(settings.connect_delay_ms, DEFAULT_CONNECT_DELAY_MS);
    }

    #[test]
    fn test_first_run_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        assert_eq!(load_or_init_settings_at(&path), Settings::default());
        assert_eq!(load_settings_from(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_corrupt_file_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_or_init_settings_at(&path), Settings::default());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_missing_and_corrupt_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(load_settings_from(&missing), Err(ConfigError::Io(_))));

        let corrupt = dir.path().join("corrupt.json");
        fs::write(&corrupt, "{ not json").unwrap();
        assert!(matches!(load_settings_from(&corrupt), Err(ConfigError::Json(_))));
    }
}
