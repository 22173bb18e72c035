//! Configuration management for the application.
//!
//! Handles loading and saving application configuration in TOML format with
//! platform-specific directory resolution. Command-line flags override
//! whatever the config file provides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::constants::APP_NAME;

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    /// Automatically detect OS theme (dark/light)
    #[default]
    Auto,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

/// Language configuration: the supported set and the active pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Supported language codes, in presentation order.
    pub supported: Vec<String>,
    /// Primary language for all localized text.
    pub primary: String,
    /// Fallback language when the primary has no entry.
    pub fallback: String,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            supported: vec!["en_US".to_string(), "de_DE".to_string()],
            primary: "en_US".to_string(),
            fallback: "de_DE".to_string(),
        }
    }
}

/// Path configuration for the data documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Layout document files, in presentation order.
    #[serde(default)]
    pub layouts: Vec<PathBuf>,
    /// Assignments document file.
    #[serde(default)]
    pub assignments: Option<PathBuf>,
}

/// UI preferences configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Theme mode preference (Auto, Dark, Light)
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/keyatlas/config.toml`
/// - macOS: `~/Library/Application Support/keyatlas/config.toml`
/// - Windows: `%APPDATA%\keyatlas\config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Language set and active pair
    #[serde(default)]
    pub languages: LanguageConfig,
    /// Data document locations
    #[serde(default)]
    pub paths: PathConfig,
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).with_context(|| {
            format!("Failed to read config file: {}", config_path.display())
        })?;

        let config: Self = toml::from_str(&content).with_context(|| {
            format!("Failed to parse config file: {}", config_path.display())
        })?;

        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses the temp file + rename pattern so a crash never leaves a
    /// half-written config behind.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_file_path()?;
        let config_dir = Self::config_dir()?;

        fs::create_dir_all(&config_dir).with_context(|| {
            format!("Failed to create config directory: {}", config_dir.display())
        })?;

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        let temp_path = config_path.with_extension("toml.tmp");
        fs::write(&temp_path, content).with_context(|| {
            format!("Failed to write config file: {}", temp_path.display())
        })?;
        fs::rename(&temp_path, &config_path).with_context(|| {
            format!("Failed to replace config file: {}", config_path.display())
        })?;

        Ok(())
    }
}
