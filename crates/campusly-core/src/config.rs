//! Persistent application configuration.
//!
//! Stored as pretty JSON at `<config dir>/campusly/config.json`. A missing
//! file yields defaults; `CAMPUSLY_API_URL` overrides the stored base URL.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Default API base URL.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// Environment variable overriding [`Config::api_base_url`].
pub const API_URL_ENV: &str = "CAMPUSLY_API_URL";

const APP_DIR: &str = "campusly";
const CONFIG_FILE: &str = "config.json";

/// Light or dark theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light theme.
    Light,
    /// Dark theme.
    #[default]
    Dark,
}

impl ThemeMode {
    /// Returns the other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the REST API, without trailing slash.
    pub api_base_url: String,
    /// Search debounce window in milliseconds.
    pub debounce_ms: u64,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Theme mode.
    pub theme: ThemeMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            debounce_ms: 300,
            request_timeout_secs: 15,
            theme: ThemeMode::default(),
        }
    }
}

impl Config {
    /// Path of the configuration file.
    #[must_use]
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(CONFIG_FILE)
    }

    /// Loads the configuration from the default path, then applies the
    /// environment override.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::path()).await?;
        if let Ok(url) = std::env::var(API_URL_ENV) {
            config.apply_api_url_override(&url);
        }
        Ok(config)
    }

    /// Loads the configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load_from(path: &Path) -> Result<Self> {
        if !tokio::fs::try_exists(path).await? {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = tokio::fs::read_to_string(path).await?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration to the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub async fn save(&self) -> Result<()> {
        self.save_to(&Self::path()).await
    }

    /// Saves the configuration to a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, contents).await?;
        info!("Config saved to {}", path.display());
        Ok(())
    }

    /// Replaces the base URL unless the override is blank.
    pub fn apply_api_url_override(&mut self, url: &str) {
        let url = url.trim();
        if !url.is_empty() {
            debug!("Using API base URL from {API_URL_ENV}");
            self.api_base_url = url.trim_end_matches('/').to_string();
        }
    }

    /// Debounce window.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(Error::Config("api_base_url must not be empty".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::Config("request_timeout_secs must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("campusly-config-test-{}-{name}", std::process::id()))
            .join(CONFIG_FILE)
    }

    #[tokio::test]
    async fn test_missing_file_gives_defaults() {
        let config = Config::load_from(&scratch("missing")).await.unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.debounce(), Duration::from_millis(300));
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let path = scratch("roundtrip");
        let config = Config {
            api_base_url: "https://campus.example/api".into(),
            theme: ThemeMode::Light,
            ..Config::default()
        };
        config.save_to(&path).await.unwrap();
        let loaded = Config::load_from(&path).await.unwrap();
        assert_eq!(loaded, config);
        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"theme":"light"}"#).unwrap();
        assert_eq!(config.theme, ThemeMode::Light);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.request_timeout_secs, 15);
    }

    #[test]
    fn test_override_trims_trailing_slash() {
        let mut config = Config::default();
        config.apply_api_url_override("  https://campus.example/api/ ");
        assert_eq!(config.api_base_url, "https://campus.example/api");
        config.apply_api_url_override("   ");
        assert_eq!(config.api_base_url, "https://campus.example/api");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.toggled().toggled(), ThemeMode::Light);
    }
}
