//! Application configuration management.
//!
//! This module handles loading and saving the application configuration:
//! the backend base URL, the last email used to log in, and the home
//! position used for new contributions and route generation.
//!
//! Configuration is stored at `~/.config/cityscope/config.json`. The base
//! URL can be overridden per run with the `CITYSCOPE_API_URL` environment
//! variable (a `.env` file works too).

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "cityscope";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default backend base URL when neither config nor env provide one
const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Fallback home position: central Rabat.
/// Stands in for the browser geolocation the web client uses.
const DEFAULT_LATITUDE: f64 = 34.0209;
const DEFAULT_LONGITUDE: f64 = -6.8416;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_url: Option<String>,
    pub last_email: Option<String>,
    pub home_latitude: Option<f64>,
    pub home_longitude: Option<f64>,
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

    /// Backend base URL: env var beats config beats default
    pub fn api_url(&self) -> String {
        std::env::var("CITYSCOPE_API_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    /// Home position for contributions and route starts
    pub fn home_position(&self) -> (f64, f64) {
        (
            self.home_latitude.unwrap_or(DEFAULT_LATITUDE),
            self.home_longitude.unwrap_or(DEFAULT_LONGITUDE),
        )
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory holding the persisted token slot
    pub fn cache_dir() -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }
}
