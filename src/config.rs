//! Configuration management
//!
//! Handles loading and saving the client settings: the colour theme, the
//! backend base URL, the account refresh interval and the default toast
//! duration.
//!
//! Configuration files are stored in platform-specific directories:
//! - macOS: `~/Library/Application Support/bankfront/config.yaml`
//! - Linux: `~/.config/bankfront/config.yaml`
//! - Windows: `%APPDATA%\bankfront\config.yaml`

use crate::stores::StdFileStore;
use crate::traits::FileStore;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Backend address used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Account list refresh interval (seconds)
pub const DEFAULT_ACCOUNT_REFRESH_SECS: u64 = 10;

/// How long a toast stays visible (milliseconds)
pub const DEFAULT_TOAST_DURATION_MS: u64 = 4000;

/// Colour theme of the interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Returns the opposite theme
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(anyhow::anyhow!("Unknown theme '{}'", other)),
        }
    }
}

/// Application configuration
///
/// Persisted as YAML in the user's config directory. Missing keys fall
/// back to their defaults so older files keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Selected colour theme
    pub theme: Theme,
    /// Base URL of the banking backend
    pub base_url: String,
    /// Seconds between account list refreshes
    pub account_refresh_secs: u64,
    /// Default toast lifetime in milliseconds
    pub toast_duration_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            theme: Theme::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            account_refresh_secs: DEFAULT_ACCOUNT_REFRESH_SECS,
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location
    ///
    /// # Returns
    /// - `Ok(Config)` with the loaded configuration, or defaults if the file doesn't exist
    /// - `Err` if the file exists but cannot be read or parsed
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?, &StdFileStore)
    }

    /// Loads configuration from an explicit path
    ///
    /// # Errors
    /// Returns an error if the file exists but is malformed or unreadable.
    pub fn load_from(path: &Path, store: &dyn FileStore) -> Result<Self> {
        if !store.exists(path) {
            tracing::debug!(?path, "no config file, using defaults");
            return Ok(Config::default());
        }

        let contents = store.read(path)?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;

        Ok(config)
    }

    /// Saves the configuration to the default config file location
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?, &StdFileStore)
    }

    /// Saves the configuration to an explicit path
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file cannot be written.
    pub fn save_to(&self, path: &Path, store: &dyn FileStore) -> Result<()> {
        if let Some(parent) = path.parent() {
            store.create_dir_all(parent)?;
        }

        let contents = serde_yaml::to_string(self).context("Failed to serialize config")?;
        store.write(path, &contents)?;
        tracing::debug!(?path, "config saved");

        Ok(())
    }

    /// Returns the platform-specific configuration file path
    ///
    /// Falls back to `~/.config/bankfront/config.yaml` if platform detection fails.
    ///
    /// # Errors
    /// Returns an error if the HOME environment variable is not set (fallback case only).
    pub fn config_path() -> Result<PathBuf> {
        if let Some(proj_dirs) = ProjectDirs::from("", "", "bankfront") {
            Ok(proj_dirs.config_dir().join("config.yaml"))
        } else {
            let home = std::env::var("HOME").context("HOME not set")?;
            Ok(PathBuf::from(home).join(".config/bankfront/config.yaml"))
        }
    }

    /// Flips the theme and returns the new value
    ///
    /// Only updates the in-memory config; call [`Config::save`] to persist.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggle();
        self.theme
    }

    pub fn account_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.account_refresh_secs.max(1))
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }
}
