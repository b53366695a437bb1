//! Application configuration management.
//!
//! This module handles loading and saving the application configuration:
//! API origin, transaction page size, session backend, optional request
//! timeout and the last email used to sign in.
//!
//! Configuration is stored at `~/.config/bvlge/config.json`. The
//! `BVLGE_API_URL` environment variable overrides the API origin.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_BASE_URL;
use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::session::{FileSessionStore, KeyringSessionStore, SessionStore};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "bvlge";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding `api_base_url`
pub const API_URL_ENV: &str = "BVLGE_API_URL";

/// Where session tokens are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    #[default]
    File,
    Keyring,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub page_size: usize,
    pub session_backend: SessionBackend,
    pub request_timeout_secs: Option<u64>,
    pub last_email: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: None,
            page_size: DEFAULT_PAGE_SIZE,
            session_backend: SessionBackend::default(),
            request_timeout_secs: None,
            last_email: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// API origin: environment override, then config file, then default
    pub fn api_base_url(&self) -> String {
        std::env::var(API_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Page size, never zero
    pub fn page_size(&self) -> usize {
        self.page_size.max(1)
    }

    /// Open the configured session backend
    pub fn session_store(&self) -> Result<Arc<dyn SessionStore>> {
        Ok(match self.session_backend {
            SessionBackend::File => Arc::new(FileSessionStore::new(self.cache_dir()?)),
            SessionBackend::Keyring => Arc::new(KeyringSessionStore::new()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"session_backend": "keyring"}"#).unwrap();
        assert_eq!(config.session_backend, SessionBackend::Keyring);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert!(config.request_timeout_secs.is_none());
    }

    #[test]
    fn test_page_size_never_zero() {
        let config = Config {
            page_size: 0,
            ..Default::default()
        };
        assert_eq!(config.page_size(), 1);
    }
}
