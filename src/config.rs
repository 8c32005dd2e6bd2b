//! Configuration module for Snapshelf

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::api::unsplash::DEFAULT_API_URL;
use crate::paths;

/// Environment variable that overrides the configured access key
pub const ACCESS_KEY_ENV: &str = "UNSPLASH_ACCESS_KEY";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Photo API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Unsplash access key (sent as `client_id`)
    #[serde(default)]
    pub access_key: String,

    /// Photos requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Pages fetched in parallel per refresh
    #[serde(default = "default_fan_out")]
    pub fan_out: u32,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// How many recent search terms to keep
    #[serde(default = "default_recent_search_limit")]
    pub recent_search_limit: usize,

    /// Where downloaded images go (defaults to ~/.config/snapshelf/downloads)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,
}

fn default_api_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_page_size() -> u32 {
    100
}

fn default_fan_out() -> u32 {
    2
}

fn default_request_timeout() -> u64 {
    30
}

fn default_recent_search_limit() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            access_key: String::new(),
            page_size: default_page_size(),
            fan_out: default_fan_out(),
            request_timeout_secs: default_request_timeout(),
            recent_search_limit: default_recent_search_limit(),
            download_dir: None,
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        paths::config_path()
    }

    /// Load config from the default path or create default
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        Self::load_from(&path)
    }

    /// Load config from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path()?;
        self.save_to(&path)
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Resolve the access key (environment first, then config file)
    pub fn access_key(&self) -> Result<String> {
        Self::resolve_access_key(std::env::var(ACCESS_KEY_ENV).ok(), &self.access_key)
    }

    fn resolve_access_key(from_env: Option<String>, configured: &str) -> Result<String> {
        if let Some(key) = from_env.filter(|k| !k.trim().is_empty()) {
            return Ok(key.trim().to_string());
        }
        if !configured.trim().is_empty() {
            return Ok(configured.trim().to_string());
        }
        bail!(
            "No Unsplash access key configured.\n\
             Set {ACCESS_KEY_ENV} or add access_key to the config file"
        )
    }

    /// Resolve the download directory
    pub fn download_dir(&self) -> Result<PathBuf> {
        match &self.download_dir {
            Some(dir) => Ok(dir.clone()),
            None => paths::downloads_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.page_size, 100);
        assert_eq!(config.fan_out, 2);
        assert_eq!(config.recent_search_limit, 5);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "access_key = \"abc\"\nfan_out = 3\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.access_key, "abc");
        assert_eq!(config.fan_out, 3);
        assert_eq!(config.api_base_url, "https://api.unsplash.com");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        let config = Config {
            page_size: 30,
            download_dir: Some(dir.path().join("dl")),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_access_key_resolution() {
        assert_eq!(
            Config::resolve_access_key(Some("env-key".to_string()), "file-key").unwrap(),
            "env-key"
        );
        assert_eq!(
            Config::resolve_access_key(Some("  ".to_string()), "file-key").unwrap(),
            "file-key"
        );
        assert!(Config::resolve_access_key(None, "").is_err());
    }
}
