//! Configuration management
//!
//! Load user preferences from a TOML config file. Form values and the theme
//! are never stored here.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::terminal_capabilities::ColorSupport;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub preview: PreviewPreferences,
    pub ui: UiPreferences,
    pub logging: LoggingPreferences,
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a file, using defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {:?}", path))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config: {:?}", path))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        if let Some(proj_dirs) = ProjectDirs::from("com", "teecraft", "teecraft") {
            Ok(proj_dirs.config_dir().join("config.toml"))
        } else {
            // Fallback to current directory
            Ok(PathBuf::from("teecraft.toml"))
        }
    }
}

/// Preview rendering preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewPreferences {
    /// Mockup width in columns; narrowed to fit the panel
    pub width: usize,
    /// Force a colour level instead of detecting it
    pub color: Option<ColorSupport>,
}

impl Default for PreviewPreferences {
    fn default() -> Self {
        Self {
            width: 36,
            color: None,
        }
    }
}

/// UI preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiPreferences {
    /// Show key hints under the focused field
    pub show_hints: bool,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self { show_hints: true }
    }
}

/// Logging preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Filter directive used when neither RUST_LOG nor TEECRAFT_LOG is set
    pub level: String,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.preview.width, 36);
        assert_eq!(config.preview.color, None);
        assert!(config.ui.show_hints);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: Config = toml::from_str("[preview]\ncolor = \"256\"\n").unwrap();
        assert_eq!(parsed.preview.color, Some(ColorSupport::Color256));
        assert_eq!(parsed.preview.width, 36);
        assert!(parsed.ui.show_hints);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[preview\nwidth = ").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
