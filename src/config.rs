//! Explicit client configuration.
//!
//! Nothing here is global: a [`Config`] is loaded or built by the caller and
//! handed to [`crate::Tracker::from_config`].

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use dirs::config_dir;
use serde::{Deserialize, Serialize};

use crate::credential::{Credential, DEFAULT_BASE_URL};
use crate::dispatch::RetryPolicy;
use crate::error::Error;

const APP_NAME: &str = "pivotal-fluent";
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding [`Config::api_key`].
pub const API_KEY_VAR: &str = "PIVOTAL_TRACKER_API_KEY";
/// Environment variable overriding [`Config::base_url`].
pub const BASE_URL_VAR: &str = "PIVOTAL_TRACKER_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API token; required before a root can be built.
    pub api_key: Option<String>,
    pub base_url: String,
    /// Total attempts per call, including the first.
    pub retry_attempts: u32,
    /// Pause between attempts in milliseconds.
    pub retry_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            retry_attempts: RetryPolicy::DEFAULT_ATTEMPTS,
            retry_delay_ms: RetryPolicy::DEFAULT_DELAY.as_millis() as u64,
        }
    }
}

impl Config {
    /// Load configuration from the user's config directory, then apply
    /// environment overrides.
    /// Falls back to defaults if the file doesn't exist or fails to parse.
    pub fn load() -> Self {
        let config = match Self::try_load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        };
        config.with_env_overrides(|name| std::env::var(name).ok())
    }

    pub fn try_load() -> anyhow::Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Load from an explicit file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config = serde_json::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save to the user's config directory.
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Override fields from variables found by `lookup`. Empty values are ignored.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name| lookup(name).filter(|v: &String| !v.trim().is_empty());
        if let Some(key) = var(API_KEY_VAR) {
            self.api_key = Some(key);
        }
        if let Some(url) = var(BASE_URL_VAR) {
            self.base_url = url;
        }
        self
    }

    /// Defaults overridden by the process environment only.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|name| std::env::var(name).ok())
    }

    pub fn credential(&self) -> crate::Result<Credential> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(Error::InvalidCredential("api key is missing"))?;
        Credential::new(key, &self.base_url)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry_attempts,
            Duration::from_millis(self.retry_delay_ms),
        )
    }
}

/// Location of the config file: `<config_dir>/pivotal-fluent/config.json`.
pub fn config_path() -> anyhow::Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.retry_policy(), RetryPolicy::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "api_key": "abc", "retry_attempts": 5 }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.retry_attempts, 5);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.retry_delay_ms, 2000);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            api_key: Some("k".into()),
            base_url: "http://localhost:9/api".into(),
            retry_attempts: 1,
            retry_delay_ms: 10,
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn env_overrides_win_unless_blank() {
        let config = Config::default().with_env_overrides(|name| match name {
            API_KEY_VAR => Some("from-env".into()),
            BASE_URL_VAR => Some("  ".into()),
            _ => None,
        });
        assert_eq!(config.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn credential_requires_api_key() {
        let err = Config::default().credential().unwrap_err();
        assert!(matches!(err, Error::InvalidCredential(_)));
    }
}
